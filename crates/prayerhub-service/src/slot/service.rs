//! Slot listing with lazy weekday materialization.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use prayerhub_core::config::RegistrationConfig;
use prayerhub_core::error::AppError;
use prayerhub_database::SlotStore;
use prayerhub_entity::slot::{NewSlot, SlotStatus};

/// Lists the slots of a day, creating them the first time a weekday is
/// viewed.
#[derive(Debug, Clone)]
pub struct SlotService {
    /// Slot store.
    slots: Arc<dyn SlotStore>,
    /// Window and slot hours.
    config: RegistrationConfig,
}

impl SlotService {
    /// Creates a new slot service.
    pub fn new(slots: Arc<dyn SlotStore>, config: RegistrationConfig) -> Self {
        Self { slots, config }
    }

    /// Slot statuses on `date`, ordered by start time.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<SlotStatus>, AppError> {
        if !self.config.is_open_on(date) {
            return Err(AppError::validation("신청 기간이 아닌 날짜입니다."));
        }

        let existing = self.read(date).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let new_slots = NewSlot::weekday_hourly(
            date,
            self.config.first_slot_hour,
            self.config.last_slot_hour,
        );
        if new_slots.is_empty() {
            return Ok(existing);
        }

        // Concurrent first views race here; duplicates are skipped by the store.
        let inserted = self
            .slots
            .insert_slots(&new_slots)
            .await
            .map_err(|e| AppError::from(e).with_message("시간대 생성 중 오류가 발생했습니다."))?;
        info!(%date, inserted, "Slots materialized");

        self.read(date).await
    }

    async fn read(&self, date: NaiveDate) -> Result<Vec<SlotStatus>, AppError> {
        self.slots
            .list_status_by_date(date)
            .await
            .map_err(|e| AppError::from(e).with_message("시간대 정보를 불러오는데 실패했습니다."))
    }
}
