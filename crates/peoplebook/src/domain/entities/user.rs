//! User - API account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// User account
///
/// The password hash is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip)]
    pub pwhash: String,
    pub name: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Compare a given API key to this user's current API key.
    ///
    /// Exact match, evaluated in constant time for equal-length keys.
    pub fn check_api_key(&self, api_key: &str) -> bool {
        self.api_key.as_bytes().ct_eq(api_key.as_bytes()).into()
    }
}
