//! User Routes

use axum::{routing::get, Extension, Json, Router};

use crate::auth::AuthenticatedUser;
use crate::models::UserResponse;
use crate::AppState;

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 400, description = "Invalid authentication params"),
        (status = 401, description = "Apikey authorization required"),
        (status = 403, description = "Invalid user or incorrect API key")
    ),
    security(("apikey" = [])),
    tag = "User"
)]
pub async fn get_current_user(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Json<UserResponse> {
    Json(user.into())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/user", get(get_current_user))
}
