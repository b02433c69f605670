//! Authorization header splitting

use super::AuthError;

/// Scheme token accepted for API key authentication (compared case-insensitively)
pub const APIKEY_SCHEME: &str = "apikey";

/// An `Authorization` header value split into scheme and credential text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub scheme: String,
    pub credentials: String,
}

impl ParsedHeader {
    pub fn is_apikey(&self) -> bool {
        self.scheme.eq_ignore_ascii_case(APIKEY_SCHEME)
    }
}

/// Split a raw header value on its first run of whitespace.
///
/// The credential text is passed through unexamined.
pub fn split_auth_header(raw: &str) -> Result<ParsedHeader, AuthError> {
    let (scheme, credentials) = raw
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(AuthError::HeaderMalformed)?;

    let credentials = credentials.trim();
    if scheme.is_empty() || credentials.is_empty() {
        return Err(AuthError::HeaderMalformed);
    }

    Ok(ParsedHeader {
        scheme: scheme.to_string(),
        credentials: credentials.to_string(),
    })
}
