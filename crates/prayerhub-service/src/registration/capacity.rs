//! Effective slot capacity lookup.

use std::sync::Arc;

use prayerhub_core::types::Capacity;
use prayerhub_database::{SettingsStore, StoreResult};
use prayerhub_entity::settings::MAX_PARTICIPANTS_PER_SLOT;
use prayerhub_entity::slot::PrayerSlot;

/// Resolves the capacity that applies to a slot.
///
/// Precedence: the slot's own override, then the global setting. The global
/// setting is read from the store on every call and never cached. A missing
/// setting row means unlimited, as in the `slot_status` view.
#[derive(Debug, Clone)]
pub struct CapacityResolver {
    /// Global settings store.
    settings: Arc<dyn SettingsStore>,
}

impl CapacityResolver {
    /// Creates a new capacity resolver.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Capacity for `slot`.
    pub async fn capacity_for(&self, slot: &PrayerSlot) -> StoreResult<Capacity> {
        if let Some(capacity) = slot.capacity_override() {
            return Ok(capacity);
        }
        self.global().await
    }

    /// The global per-slot capacity.
    pub async fn global(&self) -> StoreResult<Capacity> {
        Ok(self
            .settings
            .get_int(MAX_PARTICIPANTS_PER_SLOT)
            .await?
            .map_or(Capacity::Unlimited, Capacity::from_stored))
    }
}

/// Write `default` (`0` for unlimited) as the global capacity when the
/// setting row is missing. Returns whether a row was written.
pub async fn seed_global_capacity(settings: &dyn SettingsStore, default: u32) -> StoreResult<bool> {
    let value = i32::try_from(default).unwrap_or(i32::MAX);
    settings.seed_int(MAX_PARTICIPANTS_PER_SLOT, value).await
}
