//! Authentication Errors

use thiserror::Error;

/// Every way an API key authentication attempt can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization header not set")]
    HeaderAbsent,

    #[error("Could not parse Authorization header")]
    HeaderMalformed,

    #[error("Authorization type is not Apikey")]
    WrongScheme,

    #[error("Could not parse auth string")]
    ColonMissing,

    #[error("Could not parse authentication")]
    CredentialMalformed,

    #[error("Authentication fields email and key are both required")]
    CredentialFieldsIncomplete,

    #[error("User could not be found")]
    IdentityNotFound,

    #[error("API key does not match")]
    SecretMismatch,
}

impl AuthError {
    /// The caller did not present usable `Apikey` credentials at all
    pub fn is_challenge(&self) -> bool {
        matches!(
            self,
            Self::HeaderAbsent | Self::HeaderMalformed | Self::WrongScheme
        )
    }

    /// Credentials were presented but could not be parsed
    pub fn is_malformed_credential(&self) -> bool {
        matches!(
            self,
            Self::ColonMissing | Self::CredentialMalformed | Self::CredentialFieldsIncomplete
        )
    }
}
