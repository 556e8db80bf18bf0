//! Registrant row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use prayerhub_core::types::UserId;

/// A person who has registered for at least one slot.
///
/// Identified to the outside world by `(name, parish, phone_last_4)`;
/// created on the first registration attempt and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Generated identifier.
    pub id: UserId,
    /// Trimmed display name.
    pub name: String,
    /// Parish label, one of [`super::Parish`].
    pub parish: String,
    /// Last four digits of the registrant's phone number.
    pub phone_last_4: String,
    /// When the registrant was first seen.
    pub created_at: DateTime<Utc>,
}
