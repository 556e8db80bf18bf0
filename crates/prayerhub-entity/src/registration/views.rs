//! Joined registration read models.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use prayerhub_core::types::{RegistrationId, SlotId, UserId};

use crate::slot::model::starts_at;

/// A registration joined with its slot, as listed on "my registrations".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRegistration {
    /// Registration identifier.
    pub id: RegistrationId,
    /// Owning registrant.
    pub user_id: UserId,
    /// Claimed slot.
    pub slot_id: SlotId,
    /// Slot date.
    pub date: NaiveDate,
    /// Slot start time.
    pub start_time: NaiveTime,
    /// Slot end time.
    pub end_time: NaiveTime,
    /// Whether the slot has already ended. Filled in by the service.
    #[sqlx(skip)]
    #[serde(default)]
    pub is_completed: bool,
    /// Admission time.
    pub created_at: DateTime<Utc>,
}

impl UserRegistration {
    /// Mark the row completed if the slot ended before `now`.
    pub fn with_completion(mut self, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        self.is_completed = starts_at(self.date, self.end_time, offset) <= now;
        self
    }
}

/// A registrant of a specific slot, as shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SlotRegistrant {
    /// Registration identifier.
    pub id: RegistrationId,
    /// Registrant name.
    pub name: String,
    /// Registrant parish.
    pub parish: String,
    /// Registrant phone suffix.
    pub phone_last_4: String,
    /// Admission time.
    pub created_at: DateTime<Utc>,
}
