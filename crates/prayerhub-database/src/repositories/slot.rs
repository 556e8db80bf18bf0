//! Prayer slot repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use prayerhub_core::types::SlotId;
use prayerhub_entity::slot::{NewSlot, PrayerSlot, SlotStatus};

use crate::error::{StoreError, StoreResult};
use crate::store::SlotStore;

/// Repository for slot rows and the `slot_status` view.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: PgPool,
}

impl SlotRepository {
    /// Create a new slot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for SlotRepository {
    async fn find_slot(&self, id: SlotId) -> StoreResult<Option<PrayerSlot>> {
        sqlx::query_as::<_, PrayerSlot>("SELECT * FROM prayer_slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("Failed to find slot", e))
    }

    async fn find_status(&self, id: SlotId) -> StoreResult<Option<SlotStatus>> {
        sqlx::query_as::<_, SlotStatus>("SELECT * FROM slot_status WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx("Failed to read slot status", e))
    }

    async fn list_status_by_date(&self, date: NaiveDate) -> StoreResult<Vec<SlotStatus>> {
        sqlx::query_as::<_, SlotStatus>(
            "SELECT * FROM slot_status WHERE date = $1 ORDER BY start_time",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to list slots by date", e))
    }

    async fn insert_slots(&self, slots: &[NewSlot]) -> StoreResult<u64> {
        if slots.is_empty() {
            return Ok(0);
        }

        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        let starts: Vec<NaiveTime> = slots.iter().map(|s| s.start_time).collect();
        let ends: Vec<NaiveTime> = slots.iter().map(|s| s.end_time).collect();

        let result = sqlx::query(
            "INSERT INTO prayer_slots (date, start_time, end_time) \
             SELECT * FROM UNNEST($1::date[], $2::time[], $3::time[]) \
             ON CONFLICT (date, start_time) DO NOTHING",
        )
        .bind(&dates)
        .bind(&starts)
        .bind(&ends)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx("Failed to create slots", e))?;

        Ok(result.rows_affected())
    }
}
