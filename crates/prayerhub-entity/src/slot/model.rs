//! Prayer slot row and slot materialization.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use prayerhub_core::types::{Capacity, SlotId};

/// A one-hour interval on a given date that users may register for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PrayerSlot {
    /// Slot identifier.
    pub id: SlotId,
    /// Calendar date (local).
    pub date: NaiveDate,
    /// Local start time.
    pub start_time: NaiveTime,
    /// Local end time.
    pub end_time: NaiveTime,
    /// Per-slot capacity override; `None` falls back to the global setting.
    pub max_participants: Option<i32>,
    /// When the slot row was materialized.
    pub created_at: DateTime<Utc>,
}

impl PrayerSlot {
    /// The slot's start as an absolute instant, given the local offset
    /// its date and time are expressed in.
    pub fn starts_at(&self, offset: FixedOffset) -> DateTime<Utc> {
        starts_at(self.date, self.start_time, offset)
    }

    /// The per-slot capacity override, if any.
    pub fn capacity_override(&self) -> Option<Capacity> {
        self.max_participants.map(Capacity::from_stored)
    }
}

pub(crate) fn starts_at(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(time);
    offset
        .from_local_datetime(&local)
        .single()
        .map_or_else(|| local.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Data required to materialize a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    /// Calendar date.
    pub date: NaiveDate,
    /// Local start time.
    pub start_time: NaiveTime,
    /// Local end time.
    pub end_time: NaiveTime,
}

impl NewSlot {
    /// Build the hourly slots for `date`, starting at every hour in
    /// `first_hour..=last_hour`. Weekends produce no slots.
    pub fn weekday_hourly(date: NaiveDate, first_hour: u32, last_hour: u32) -> Vec<Self> {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Vec::new();
        }

        (first_hour..=last_hour)
            .filter_map(|hour| {
                let start_time = NaiveTime::from_hms_opt(hour, 0, 0)?;
                let end_time = NaiveTime::from_hms_opt(hour + 1, 0, 0)?;
                Some(Self {
                    date,
                    start_time,
                    end_time,
                })
            })
            .collect()
    }
}
