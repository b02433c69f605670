//! User Repository Port

use async_trait::async_trait;

use crate::domain::{errors::DomainError, User};

/// Repository interface for User lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a User by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
