//! Slot registration rules: window, slot hours, capacity and retry tuning.

use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Registration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Inclusive date range open for registration. `None` leaves it unbounded.
    #[serde(default)]
    pub window: Option<RegistrationWindow>,
    /// Hour of the first slot of the day (inclusive).
    #[serde(default = "default_first_slot_hour")]
    pub first_slot_hour: u32,
    /// Hour of the last slot of the day (inclusive start hour).
    #[serde(default = "default_last_slot_hour")]
    pub last_slot_hour: u32,
    /// Global capacity written at startup when the setting row is missing.
    /// `0` means unlimited.
    #[serde(default = "default_capacity")]
    pub default_capacity: u32,
    /// Offset of the local wall clock that slot dates and times are expressed in.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Admission retry tuning.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            window: None,
            first_slot_hour: default_first_slot_hour(),
            last_slot_hour: default_last_slot_hour(),
            default_capacity: default_capacity(),
            utc_offset_minutes: default_utc_offset_minutes(),
            retry: RetryConfig::default(),
        }
    }
}

impl RegistrationConfig {
    /// The local offset slot times are interpreted in.
    ///
    /// Out-of-range values fall back to UTC.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Whether `date` lies inside the configured window.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.window.as_ref().is_none_or(|w| w.contains(date))
    }
}

/// Inclusive registration date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWindow {
    /// First open date.
    pub start: NaiveDate,
    /// Last open date.
    pub end: NaiveDate,
}

impl RegistrationWindow {
    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Retry tuning for the admission loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of insert attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetryConfig {
    /// The backoff as a [`Duration`].
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

fn default_first_slot_hour() -> u32 {
    7
}

fn default_last_slot_hour() -> u32 {
    18
}

fn default_capacity() -> u32 {
    10
}

fn default_utc_offset_minutes() -> i32 {
    540
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    100
}
