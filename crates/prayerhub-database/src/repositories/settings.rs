//! Global settings repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use prayerhub_entity::settings::GlobalSetting;

use crate::error::{StoreError, StoreResult};
use crate::store::SettingsStore;

/// Repository for `global_settings`.
///
/// Values are read on every call; nothing is cached in process so that
/// every request handler observes the current value.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn get_int(&self, key: &str) -> StoreResult<Option<i32>> {
        sqlx::query_scalar::<_, i32>(
            "SELECT setting_value FROM global_settings WHERE setting_key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to read setting", e))
    }

    async fn set_int(&self, key: &str, value: i32) -> StoreResult<Option<GlobalSetting>> {
        sqlx::query_as::<_, GlobalSetting>(
            "UPDATE global_settings SET setting_value = $2, updated_at = NOW() \
             WHERE setting_key = $1 RETURNING *",
        )
        .bind(key)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to update setting", e))
    }

    async fn seed_int(&self, key: &str, value: i32) -> StoreResult<bool> {
        sqlx::query(
            "INSERT INTO global_settings (setting_key, setting_value) VALUES ($1, $2) \
             ON CONFLICT (setting_key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map(|done| done.rows_affected() == 1)
        .map_err(|e| StoreError::from_sqlx("Failed to seed setting", e))
    }
}
