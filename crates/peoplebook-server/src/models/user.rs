//! User DTOs

use chrono::{DateTime, Utc};
use peoplebook::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User response (the authenticated caller)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            api_key: user.api_key,
            created_at: user.created_at,
        }
    }
}
