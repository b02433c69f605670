//! `identity:secret` splitting with optional Base64

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::AuthError;

/// Split credentials into email and API key on the first colon.
///
/// Parses `test@example.com:abcdefg` into `("test@example.com", "abcdefg")`.
/// Text that decodes as standard Base64 is split after decoding (invalid
/// UTF-8 sequences become U+FFFD); anything else is split as-is.
pub fn split_colon(text: &str) -> Result<(String, String), AuthError> {
    let decoded = decode_base64(text);
    let text = decoded.as_deref().unwrap_or(text);

    let (identity, secret) = text.split_once(':').ok_or(AuthError::ColonMissing)?;

    Ok((identity.trim().to_string(), secret.trim().to_string()))
}

fn decode_base64(text: &str) -> Option<String> {
    let bytes = STANDARD.decode(text).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
