//! Slot capacity.

use serde::{Deserialize, Serialize};

/// Maximum admitted registrations for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capacity {
    /// At most this many registrations are admitted.
    Limited(u32),
    /// No upper bound.
    Unlimited,
}

impl Capacity {
    /// Returns `true` if a slot that already holds `current` registrations
    /// must refuse another one.
    pub fn is_reached_by(&self, current: u32) -> bool {
        match self {
            Self::Limited(max) => current >= *max,
            Self::Unlimited => false,
        }
    }

    /// Remaining spots for a slot holding `current` registrations.
    pub fn remaining(&self, current: u32) -> Option<u32> {
        match self {
            Self::Limited(max) => Some(max.saturating_sub(current)),
            Self::Unlimited => None,
        }
    }

    /// Interpret a stored column value, where zero or negative means unlimited.
    pub fn from_stored(value: i32) -> Self {
        u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .map_or(Self::Unlimited, Self::Limited)
    }
}
