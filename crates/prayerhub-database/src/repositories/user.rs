//! Registrant repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use prayerhub_core::types::UserId;
use prayerhub_entity::user::{User, UserIdentity};

use crate::error::{StoreError, StoreResult};
use crate::store::UserStore;

/// Repository for registrant rows.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_identity(&self, identity: &UserIdentity) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE name = $1 AND parish = $2 AND phone_last_4 = $3 LIMIT 1",
        )
        .bind(identity.name())
        .bind(identity.parish().as_str())
        .bind(identity.phone_last_4())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to find user by identity", e))
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("Failed to find user by id", e))
    }

    async fn insert(&self, identity: &UserIdentity) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, parish, phone_last_4) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(identity.name())
        .bind(identity.parish().as_str())
        .bind(identity.phone_last_4())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to create user", e))
    }
}
