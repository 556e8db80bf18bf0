//! Global settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key of the global per-slot capacity setting.
pub const MAX_PARTICIPANTS_PER_SLOT: &str = "max_participants_per_slot";

/// A row of `global_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GlobalSetting {
    /// Setting key.
    pub setting_key: String,
    /// Integer value.
    pub setting_value: i32,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
