//! Registration row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use prayerhub_core::types::{RegistrationId, SlotId, UserId};

/// A user's admitted claim on a slot.
///
/// At most one row exists per `(user_id, slot_id)`; the store enforces this
/// with a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    /// Registration identifier.
    pub id: RegistrationId,
    /// Owning registrant.
    pub user_id: UserId,
    /// Claimed slot.
    pub slot_id: SlotId,
    /// Admission time.
    pub created_at: DateTime<Utc>,
}
