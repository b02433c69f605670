//! Credential resolution across field and colon forms

use super::{split_colon, split_fields, AuthError, FieldMap};

pub const EMAIL_FIELD: &str = "email";
pub const KEY_FIELD: &str = "key";

/// Email and API key presented by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub identity: String,
    pub secret: String,
}

impl Credential {
    /// Resolve credential text into an email and API key.
    ///
    /// Fewer than two recognizable fields means the text is treated as colon
    /// form. Two or more fields must include both `email` and `key`; there is
    /// no colon fallback in that case.
    pub fn resolve(text: &str) -> Result<Self, AuthError> {
        let fields = split_fields(text);

        if fields.len() < 2 {
            Self::from_colon_form(text)
        } else {
            Self::from_field_form(fields)
        }
    }

    fn from_colon_form(text: &str) -> Result<Self, AuthError> {
        let (identity, secret) = split_colon(text).map_err(|e| match e {
            AuthError::ColonMissing => AuthError::CredentialMalformed,
            other => other,
        })?;

        Ok(Self { identity, secret })
    }

    fn from_field_form(mut fields: FieldMap) -> Result<Self, AuthError> {
        match (fields.remove(EMAIL_FIELD), fields.remove(KEY_FIELD)) {
            (Some(identity), Some(secret)) => Ok(Self {
                identity: identity.trim().to_string(),
                secret: secret.trim().to_string(),
            }),
            _ => Err(AuthError::CredentialFieldsIncomplete),
        }
    }
}

/// Free-function form of [`Credential::resolve`]
pub fn resolve_credentials(text: &str) -> Result<Credential, AuthError> {
    Credential::resolve(text)
}
