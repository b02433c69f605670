//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;

use peoplebook::{DomainError, User, UserRepository};

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    pwhash: String,
    name: String,
    is_active: bool,
    is_superuser: bool,
    apikey: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            pwhash: row.pwhash,
            name: row.name,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
            api_key: row.apikey,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pwhash, name, is_active, is_superuser, apikey, created_at
            FROM "user"
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(Into::into))
    }
}
