//! Slot status read model.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use prayerhub_core::types::SlotId;

/// A row of the `slot_status` view: a slot plus its live registration count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SlotStatus {
    /// Slot identifier.
    pub id: SlotId,
    /// Calendar date.
    pub date: NaiveDate,
    /// Local start time.
    pub start_time: NaiveTime,
    /// Local end time.
    pub end_time: NaiveTime,
    /// Effective capacity (override, else global). `None` when unlimited.
    pub max_participants: Option<i32>,
    /// Registrations currently admitted.
    pub current_participants: i64,
    /// `max_participants - current_participants`, floored at zero.
    pub available_spots: Option<i64>,
}

impl SlotStatus {
    /// Current count as `u32`, saturating.
    pub fn current_count(&self) -> u32 {
        u32::try_from(self.current_participants.max(0)).unwrap_or(u32::MAX)
    }
}
