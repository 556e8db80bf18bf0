//! Registration repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use prayerhub_core::types::{RegistrationId, SlotId, UserId};
use prayerhub_entity::registration::{Registration, SlotRegistrant, UserRegistration};

use crate::error::{StoreError, StoreResult};
use crate::store::RegistrationStore;

/// Repository for registration rows.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn insert(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<Registration> {
        sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (user_id, slot_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(slot_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to create registration", e))
    }

    async fn delete(&self, id: RegistrationId, user_id: UserId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("Failed to delete registration", e))?;

        Ok(result.rows_affected())
    }

    async fn exists(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM registrations WHERE user_id = $1 AND slot_id = $2)",
        )
        .bind(user_id)
        .bind(slot_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to check duplicate registration", e))
    }

    async fn find_owned(
        &self,
        id: RegistrationId,
        user_id: UserId,
    ) -> StoreResult<Option<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to find registration", e))
    }

    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<UserRegistration>> {
        sqlx::query_as::<_, UserRegistration>(
            "SELECT id, user_id, slot_id, date, start_time, end_time, created_at \
             FROM user_registrations WHERE user_id = $1 \
             ORDER BY date ASC, start_time ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to list user registrations", e))
    }

    async fn list_for_slot(&self, slot_id: SlotId) -> StoreResult<Vec<SlotRegistrant>> {
        sqlx::query_as::<_, SlotRegistrant>(
            "SELECT r.id, u.name, u.parish, u.phone_last_4, r.created_at \
             FROM registrations r JOIN users u ON u.id = r.user_id \
             WHERE r.slot_id = $1 ORDER BY r.created_at",
        )
        .bind(slot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to list slot registrants", e))
    }
}
