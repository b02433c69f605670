//! API Key Authentication (`Authorization: Apikey ...`)
//!
//! Requests to protected routes must carry an `Authorization` header with the
//! `Apikey` scheme and an email + API key in one of the forms understood by
//! [`peoplebook::auth`]. The request is rejected with:
//!
//! - 401 + `WWW-Authenticate: Apikey` when the header is missing, malformed or
//!   uses another scheme
//! - 400 when the credentials cannot be parsed
//! - 403 when the user does not exist or the API key does not match
//!
//! On success the [`AuthenticatedUser`] is attached to the request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use peoplebook::{auth::split_auth_header, AuthError, Credential, User, UserRepository};

/// Challenge sent with every 401
const APIKEY_CHALLENGE: &str = "Apikey";

pub const APIKEY_REQUIRED_MESSAGE: &str = "Apikey authorization required";
pub const INVALID_PARAMS_MESSAGE: &str = "Invalid authentication params";
pub const INVALID_USER_MESSAGE: &str = "Invalid user";
pub const INCORRECT_API_KEY_MESSAGE: &str = "Incorrect API key";

/// The user a request was authenticated as
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Terminal response for a failed authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRejection(pub AuthError);

impl AuthRejection {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AuthError::IdentityNotFound | AuthError::SecretMismatch => StatusCode::FORBIDDEN,
            e if e.is_malformed_credential() => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.0 {
            AuthError::IdentityNotFound => INVALID_USER_MESSAGE,
            AuthError::SecretMismatch => INCORRECT_API_KEY_MESSAGE,
            e if e.is_malformed_credential() => INVALID_PARAMS_MESSAGE,
            _ => APIKEY_REQUIRED_MESSAGE,
        }
    }
}

impl From<AuthError> for AuthRejection {
    fn from(e: AuthError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let mut response = (self.status(), self.message()).into_response();
        if self.0.is_challenge() {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(APIKEY_CHALLENGE),
            );
        }
        response
    }
}

/// API key authenticator with its user lookup injected
#[derive(Clone)]
pub struct ApiKeyAuth {
    users: Arc<dyn UserRepository>,
}

impl ApiKeyAuth {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Run the full check against a request's headers.
    ///
    /// The user lookup happens at most once, and only after the credentials
    /// have been parsed.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        // Only the first Authorization header is consulted
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::HeaderAbsent)?;
        let raw =
            std::str::from_utf8(value.as_bytes()).map_err(|_| AuthError::HeaderMalformed)?;

        if raw.trim().is_empty() {
            return Err(AuthError::HeaderAbsent);
        }

        let parsed = split_auth_header(raw)?;
        if !parsed.is_apikey() {
            return Err(AuthError::WrongScheme);
        }

        let credential = Credential::resolve(&parsed.credentials)?;

        let user = match self.users.find_by_email(&credential.identity).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::IdentityNotFound),
            Err(e) => {
                tracing::warn!("User lookup failed for {}: {}", credential.identity, e);
                return Err(AuthError::IdentityNotFound);
            }
        };

        if !user.check_api_key(&credential.secret) {
            return Err(AuthError::SecretMismatch);
        }

        Ok(user)
    }
}

/// Authentication middleware
/// Validates `Apikey` credentials against the user repository
pub async fn require_api_key(
    State(auth): State<ApiKeyAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    match auth.authenticate(request.headers()).await {
        Ok(user) => {
            tracing::debug!("Authenticated {} via API key", user.email);
            request.extensions_mut().insert(AuthenticatedUser(user));
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!("API key authentication failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::{
        body::Body, http::Request as HttpRequest, middleware, routing::get, Extension, Router,
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use peoplebook::DomainError;
    use tower::ServiceExt;

    /// Serves a single user and counts lookups
    struct StubUsers {
        user: Option<User>,
        fail: bool,
        lookups: AtomicUsize,
    }

    impl StubUsers {
        fn with_user(user: User) -> Arc<Self> {
            Arc::new(Self {
                user: Some(user),
                fail: false,
                lookups: AtomicUsize::new(0),
            })
        }

        fn empty() -> Arc<Self> {
            Arc::new(Self {
                user: None,
                fail: false,
                lookups: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                user: None,
                fail: true,
                lookups: AtomicUsize::new(0),
            })
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl UserRepository for StubUsers {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::Repository("connection timed out".to_string()));
            }
            Ok(self.user.clone().filter(|u| u.email == email))
        }
    }

    fn test_user() -> User {
        User {
            id: 1,
            email: "test@example.com".to_string(),
            pwhash: String::new(),
            name: "Test User".to_string(),
            is_active: true,
            is_superuser: false,
            api_key: "abcdefg".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    async fn whoami(Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>) -> String {
        user.email
    }

    fn app(users: Arc<StubUsers>) -> Router {
        Router::new()
            .route("/api/user", get(whoami))
            .layer(middleware::from_fn_with_state(
                ApiKeyAuth::new(users),
                require_api_key,
            ))
    }

    async fn send(
        users: Arc<StubUsers>,
        authorization: Option<&str>,
    ) -> (StatusCode, HeaderMap, String) {
        let mut builder = HttpRequest::builder().uri("/api/user");
        if let Some(value) = authorization {
            let value = HeaderValue::from_bytes(value.as_bytes()).unwrap();
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let req = builder.body(Body::empty()).unwrap();

        let resp = app(users).oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn assert_challenge(status: StatusCode, headers: &HeaderMap, body: &str) {
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Apikey");
        assert_eq!(body, APIKEY_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_authorizes_colon_form() {
        let users = StubUsers::with_user(test_user());
        let (status, _, body) =
            send(users.clone(), Some("Apikey test@example.com:abcdefg")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "test@example.com");
        assert_eq!(users.lookups(), 1);
    }

    #[tokio::test]
    async fn test_authorizes_base64_colon_form() {
        let users = StubUsers::with_user(test_user());
        let header = format!("Apikey {}", STANDARD.encode("test@example.com:abcdefg"));
        let (status, _, body) = send(users.clone(), Some(&header)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "test@example.com");
    }

    #[tokio::test]
    async fn test_authorizes_field_form_with_lowercase_scheme() {
        let users = StubUsers::with_user(test_user());
        let (status, _, body) = send(
            users.clone(),
            Some(r#"apikey email="test@example.com", key="abcdefg""#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "test@example.com");
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let users = StubUsers::with_user(test_user());
        let (status, headers, body) = send(users.clone(), None).await;

        assert_challenge(status, &headers, &body);
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_rejects_empty_header() {
        let users = StubUsers::with_user(test_user());
        let (status, headers, body) = send(users.clone(), Some("   ")).await;

        assert_challenge(status, &headers, &body);
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_rejects_header_without_credentials() {
        let users = StubUsers::with_user(test_user());
        let (status, headers, body) = send(users.clone(), Some("Apikey")).await;

        assert_challenge(status, &headers, &body);
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_rejects_other_scheme() {
        let users = StubUsers::with_user(test_user());
        let (status, headers, body) = send(users.clone(), Some("Basic YWJjOjEyMw==")).await;

        assert_challenge(status, &headers, &body);
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_rejects_unparseable_credentials() {
        let users = StubUsers::with_user(test_user());
        let (status, headers, body) = send(users.clone(), Some("Apikey asdf")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(headers.get(header::WWW_AUTHENTICATE).is_none());
        assert_eq!(body, INVALID_PARAMS_MESSAGE);
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_rejects_incomplete_fields() {
        let users = StubUsers::with_user(test_user());
        let (status, _, body) = send(users.clone(), Some("Apikey a=1,b=2")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, INVALID_PARAMS_MESSAGE);
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_rejects_unknown_user() {
        let users = StubUsers::empty();
        let (status, _, body) =
            send(users.clone(), Some("Apikey test@example.com:abcdefg")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, INVALID_USER_MESSAGE);
        assert_eq!(users.lookups(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_invalid_user() {
        let users = StubUsers::failing();
        let (status, _, body) =
            send(users.clone(), Some("Apikey test@example.com:abcdefg")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, INVALID_USER_MESSAGE);
        assert_eq!(users.lookups(), 1);
    }

    #[tokio::test]
    async fn test_rejects_wrong_api_key() {
        let users = StubUsers::with_user(test_user());
        let (status, _, body) =
            send(users.clone(), Some("Apikey test@example.com:abcdefg!!!")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, INCORRECT_API_KEY_MESSAGE);
        assert_eq!(users.lookups(), 1);
    }

    #[tokio::test]
    async fn test_authenticate_without_http() {
        let users = StubUsers::with_user(test_user());
        let auth = ApiKeyAuth::new(users.clone());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("APIKEY  test@example.com : abcdefg "),
        );

        let user = auth.authenticate(&headers).await.unwrap();
        assert_eq!(user.id, 1);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer token"));
        assert_eq!(
            auth.authenticate(&headers).await.unwrap_err(),
            AuthError::WrongScheme
        );
        assert_eq!(users.lookups(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_identity_reaches_lookup() {
        let users = StubUsers::with_user(test_user());
        let (status, _, body) =
            send(users.clone(), Some("Apikey josé@example.com:abcdefg")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, INVALID_USER_MESSAGE);
        assert_eq!(users.lookups(), 1);
    }

    #[tokio::test]
    async fn test_non_utf8_header_is_malformed() {
        let users = StubUsers::with_user(test_user());
        let auth = ApiKeyAuth::new(users.clone());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Apikey test@example.com:\xff").unwrap(),
        );

        assert_eq!(
            auth.authenticate(&headers).await.unwrap_err(),
            AuthError::HeaderMalformed
        );
        assert_eq!(users.lookups(), 0);
    }

    #[tokio::test]
    async fn test_only_first_authorization_header_counts() {
        let users = StubUsers::with_user(test_user());
        let auth = ApiKeyAuth::new(users.clone());
        let valid = HeaderValue::from_static("Apikey test@example.com:abcdefg");
        let invalid = HeaderValue::from_static("Basic YWJjOjEyMw==");

        let mut headers = HeaderMap::new();
        headers.append(header::AUTHORIZATION, valid.clone());
        headers.append(header::AUTHORIZATION, invalid.clone());
        let user = auth.authenticate(&headers).await.unwrap();
        assert_eq!(user.email, "test@example.com");

        let mut headers = HeaderMap::new();
        headers.append(header::AUTHORIZATION, invalid);
        headers.append(header::AUTHORIZATION, valid);
        assert_eq!(
            auth.authenticate(&headers).await.unwrap_err(),
            AuthError::WrongScheme
        );

        assert_eq!(users.lookups(), 1);
    }

    #[test]
    fn test_rejection_mapping() {
        let cases = [
            (AuthError::HeaderAbsent, StatusCode::UNAUTHORIZED, APIKEY_REQUIRED_MESSAGE),
            (AuthError::HeaderMalformed, StatusCode::UNAUTHORIZED, APIKEY_REQUIRED_MESSAGE),
            (AuthError::WrongScheme, StatusCode::UNAUTHORIZED, APIKEY_REQUIRED_MESSAGE),
            (AuthError::CredentialMalformed, StatusCode::BAD_REQUEST, INVALID_PARAMS_MESSAGE),
            (
                AuthError::CredentialFieldsIncomplete,
                StatusCode::BAD_REQUEST,
                INVALID_PARAMS_MESSAGE,
            ),
            (AuthError::IdentityNotFound, StatusCode::FORBIDDEN, INVALID_USER_MESSAGE),
            (AuthError::SecretMismatch, StatusCode::FORBIDDEN, INCORRECT_API_KEY_MESSAGE),
        ];

        for (error, status, message) in cases {
            let rejection = AuthRejection::from(error);
            assert_eq!(rejection.status(), status, "{error:?}");
            assert_eq!(rejection.message(), message, "{error:?}");
        }
    }
}
