//! Store contracts consumed by the service layer.
//!
//! Each trait mirrors one external collaborator of the admission and
//! cancellation controllers. The PostgreSQL repositories and
//! [`MemoryStore`](crate::memory::MemoryStore) both implement them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use prayerhub_core::types::{RegistrationId, SlotId, UserId};
use prayerhub_entity::registration::{Registration, SlotRegistrant, UserRegistration};
use prayerhub_entity::settings::GlobalSetting;
use prayerhub_entity::slot::{NewSlot, PrayerSlot, SlotStatus};
use prayerhub_entity::user::{User, UserIdentity};

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::repositories::{
    RegistrationRepository, SettingsRepository, SlotRepository, StatsRepository, UserRepository,
};

/// Slot rows and the slot status read model.
#[async_trait]
pub trait SlotStore: Send + Sync + std::fmt::Debug {
    /// Find a slot by id.
    async fn find_slot(&self, id: SlotId) -> StoreResult<Option<PrayerSlot>>;

    /// Read the live status (current count) of a slot.
    async fn find_status(&self, id: SlotId) -> StoreResult<Option<SlotStatus>>;

    /// List slot statuses on `date`, ordered by start time.
    async fn list_status_by_date(&self, date: NaiveDate) -> StoreResult<Vec<SlotStatus>>;

    /// Insert slots, silently skipping any `(date, start_time)` that already
    /// exists. Returns the number of rows inserted.
    async fn insert_slots(&self, slots: &[NewSlot]) -> StoreResult<u64>;
}

/// Integer key-value settings.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug {
    /// Read a setting. `None` when the key is absent.
    async fn get_int(&self, key: &str) -> StoreResult<Option<i32>>;

    /// Update an existing setting. `None` when the key is absent.
    async fn set_int(&self, key: &str, value: i32) -> StoreResult<Option<GlobalSetting>>;

    /// Insert a setting unless the key already exists. Returns whether a row
    /// was written.
    async fn seed_int(&self, key: &str, value: i32) -> StoreResult<bool>;
}

/// Registration rows.
#[async_trait]
pub trait RegistrationStore: Send + Sync + std::fmt::Debug {
    /// Insert a registration.
    ///
    /// Fails with [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation)
    /// when `(user_id, slot_id)` already exists.
    async fn insert(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<Registration>;

    /// Delete a registration owned by `user_id`. Returns rows affected.
    async fn delete(&self, id: RegistrationId, user_id: UserId) -> StoreResult<u64>;

    /// Whether `(user_id, slot_id)` is already registered.
    async fn exists(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<bool>;

    /// Find a registration by id, scoped to its owner.
    async fn find_owned(
        &self,
        id: RegistrationId,
        user_id: UserId,
    ) -> StoreResult<Option<Registration>>;

    /// List a user's registrations joined with their slots, earliest first.
    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<UserRegistration>>;

    /// List the registrants of a slot in admission order.
    async fn list_for_slot(&self, slot_id: SlotId) -> StoreResult<Vec<SlotRegistrant>>;
}

/// Registrant rows.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find a registrant by composite identity.
    async fn find_by_identity(&self, identity: &UserIdentity) -> StoreResult<Option<User>>;

    /// Find a registrant by id.
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Insert a registrant. Fails with a uniqueness violation when the
    /// identity already exists.
    async fn insert(&self, identity: &UserIdentity) -> StoreResult<User>;
}

/// Aggregate counts for the admin dashboard.
#[async_trait]
pub trait StatsStore: Send + Sync + std::fmt::Debug {
    /// Total registrations.
    async fn count_registrations(&self) -> StoreResult<i64>;

    /// Total registrants.
    async fn count_users(&self) -> StoreResult<i64>;

    /// Registrations admitted in `[from, to)`.
    async fn count_registrations_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<i64>;

    /// Registration counts grouped by registrant parish, ordered by parish.
    async fn registrations_by_parish(&self) -> StoreResult<Vec<(String, i64)>>;
}

/// The full set of stores a deployment runs against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Registrant store.
    pub users: Arc<dyn UserStore>,
    /// Slot store and status view.
    pub slots: Arc<dyn SlotStore>,
    /// Registration store.
    pub registrations: Arc<dyn RegistrationStore>,
    /// Settings store.
    pub settings: Arc<dyn SettingsStore>,
    /// Dashboard aggregates.
    pub stats: Arc<dyn StatsStore>,
}

impl Stores {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            slots: Arc::new(SlotRepository::new(pool.clone())),
            registrations: Arc::new(RegistrationRepository::new(pool.clone())),
            settings: Arc::new(SettingsRepository::new(pool.clone())),
            stats: Arc::new(StatsRepository::new(pool)),
        }
    }

    /// Every store backed by the same in-memory instance.
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            slots: store.clone(),
            registrations: store.clone(),
            settings: store.clone(),
            stats: store,
        }
    }
}
