//! In-memory store using a Tokio mutex for tests and single-node development.
//!
//! Enforces the same uniqueness constraints as the PostgreSQL schema and
//! reports violations with the same constraint names.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use prayerhub_core::types::{Capacity, RegistrationId, SlotId, UserId};
use prayerhub_entity::registration::{Registration, SlotRegistrant, UserRegistration};
use prayerhub_entity::settings::{GlobalSetting, MAX_PARTICIPANTS_PER_SLOT};
use prayerhub_entity::slot::{NewSlot, PrayerSlot, SlotStatus};
use prayerhub_entity::user::{User, UserIdentity};

use crate::error::{StoreError, StoreResult};
use crate::store::{RegistrationStore, SettingsStore, SlotStore, StatsStore, UserStore};

const USERS_IDENTITY_KEY: &str = "users_identity_key";
const REGISTRATIONS_USER_SLOT_KEY: &str = "registrations_user_slot_key";

/// Seeded value of the global per-slot capacity.
const DEFAULT_GLOBAL_CAPACITY: i32 = 10;

fn global_setting(key: &str, value: i32) -> GlobalSetting {
    GlobalSetting {
        setting_key: key.to_string(),
        setting_value: value,
        updated_at: Utc::now(),
    }
}

#[derive(Debug, Default)]
struct InnerState {
    users: Vec<User>,
    slots: BTreeMap<SlotId, PrayerSlot>,
    registrations: Vec<Registration>,
    settings: HashMap<String, GlobalSetting>,
}

impl InnerState {
    fn status_of(&self, slot: &PrayerSlot) -> SlotStatus {
        let current = self
            .registrations
            .iter()
            .filter(|r| r.slot_id == slot.id)
            .count();
        let global = self
            .settings
            .get(MAX_PARTICIPANTS_PER_SLOT)
            .map(|s| s.setting_value);
        let capacity = slot
            .max_participants
            .or(global)
            .map_or(Capacity::Unlimited, Capacity::from_stored);
        let current = u32::try_from(current).unwrap_or(u32::MAX);

        SlotStatus {
            id: slot.id,
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            max_participants: match capacity {
                Capacity::Limited(max) => i32::try_from(max).ok(),
                Capacity::Unlimited => None,
            },
            current_participants: i64::from(current),
            available_spots: capacity.remaining(current).map(i64::from),
        }
    }

    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// In-memory implementation of every store contract.
///
/// Cloning yields a handle onto the same state.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store with the global capacity seeded to 10.
    pub fn new() -> Self {
        let mut inner = InnerState::default();
        inner.settings.insert(
            MAX_PARTICIPANTS_PER_SLOT.to_string(),
            global_setting(MAX_PARTICIPANTS_PER_SLOT, DEFAULT_GLOBAL_CAPACITY),
        );
        Self {
            state: Arc::new(Mutex::new(inner)),
        }
    }

    /// Insert a single slot with an optional capacity override and return it.
    pub async fn seed_slot(&self, slot: NewSlot, max_participants: Option<i32>) -> PrayerSlot {
        let mut state = self.state.lock().await;
        let row = PrayerSlot {
            id: SlotId::new(),
            date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            max_participants,
            created_at: Utc::now(),
        };
        state.slots.insert(row.id, row.clone());
        row
    }

    /// Number of registrations currently held by `slot_id`.
    pub async fn registration_count(&self, slot_id: SlotId) -> usize {
        let state = self.state.lock().await;
        state
            .registrations
            .iter()
            .filter(|r| r.slot_id == slot_id)
            .count()
    }

    /// Replace the per-slot override of `slot_id`, as an operator editing the
    /// row would.
    pub async fn set_slot_override(&self, slot_id: SlotId, max_participants: Option<i32>) {
        if let Some(slot) = self.state.lock().await.slots.get_mut(&slot_id) {
            slot.max_participants = max_participants;
        }
    }

    /// Remove a setting, as if the row had never been seeded.
    pub async fn remove_setting(&self, key: &str) {
        self.state.lock().await.settings.remove(key);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn find_slot(&self, id: SlotId) -> StoreResult<Option<PrayerSlot>> {
        Ok(self.state.lock().await.slots.get(&id).cloned())
    }

    async fn find_status(&self, id: SlotId) -> StoreResult<Option<SlotStatus>> {
        let state = self.state.lock().await;
        Ok(state.slots.get(&id).map(|slot| state.status_of(slot)))
    }

    async fn list_status_by_date(&self, date: NaiveDate) -> StoreResult<Vec<SlotStatus>> {
        let state = self.state.lock().await;
        let mut rows: Vec<SlotStatus> = state
            .slots
            .values()
            .filter(|slot| slot.date == date)
            .map(|slot| state.status_of(slot))
            .collect();
        rows.sort_by_key(|s| s.start_time);
        Ok(rows)
    }

    async fn insert_slots(&self, slots: &[NewSlot]) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        let mut inserted = 0;

        for slot in slots {
            let taken = state
                .slots
                .values()
                .any(|s| s.date == slot.date && s.start_time == slot.start_time);
            if taken {
                continue;
            }
            let row = PrayerSlot {
                id: SlotId::new(),
                date: slot.date,
                start_time: slot.start_time,
                end_time: slot.end_time,
                max_participants: None,
                created_at: Utc::now(),
            };
            state.slots.insert(row.id, row);
            inserted += 1;
        }

        debug!(inserted, "Slots materialized");
        Ok(inserted)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_int(&self, key: &str) -> StoreResult<Option<i32>> {
        Ok(self
            .state
            .lock()
            .await
            .settings
            .get(key)
            .map(|s| s.setting_value))
    }

    async fn set_int(&self, key: &str, value: i32) -> StoreResult<Option<GlobalSetting>> {
        let mut state = self.state.lock().await;
        Ok(state.settings.get_mut(key).map(|setting| {
            setting.setting_value = value;
            setting.updated_at = Utc::now();
            setting.clone()
        }))
    }

    async fn seed_int(&self, key: &str, value: i32) -> StoreResult<bool> {
        let mut state = self.state.lock().await;
        if state.settings.contains_key(key) {
            return Ok(false);
        }
        state
            .settings
            .insert(key.to_string(), global_setting(key, value));
        Ok(true)
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<Registration> {
        let mut state = self.state.lock().await;

        if state.user(user_id).is_none() || !state.slots.contains_key(&slot_id) {
            return Err(StoreError::backend(
                "Failed to create registration: foreign key violation",
            ));
        }

        if state
            .registrations
            .iter()
            .any(|r| r.user_id == user_id && r.slot_id == slot_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: REGISTRATIONS_USER_SLOT_KEY.to_string(),
            });
        }

        let row = Registration {
            id: RegistrationId::new(),
            user_id,
            slot_id,
            created_at: Utc::now(),
        };
        state.registrations.push(row.clone());
        Ok(row)
    }

    async fn delete(&self, id: RegistrationId, user_id: UserId) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.registrations.len();
        state
            .registrations
            .retain(|r| !(r.id == id && r.user_id == user_id));
        Ok((before - state.registrations.len()) as u64)
    }

    async fn exists(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .registrations
            .iter()
            .any(|r| r.user_id == user_id && r.slot_id == slot_id))
    }

    async fn find_owned(
        &self,
        id: RegistrationId,
        user_id: UserId,
    ) -> StoreResult<Option<Registration>> {
        Ok(self
            .state
            .lock()
            .await
            .registrations
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<UserRegistration>> {
        let state = self.state.lock().await;
        let mut rows: Vec<UserRegistration> = state
            .registrations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                let slot = state.slots.get(&r.slot_id)?;
                Some(UserRegistration {
                    id: r.id,
                    user_id: r.user_id,
                    slot_id: r.slot_id,
                    date: slot.date,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    is_completed: false,
                    created_at: r.created_at,
                })
            })
            .collect();
        rows.sort_by_key(|r| (r.date, r.start_time));
        Ok(rows)
    }

    async fn list_for_slot(&self, slot_id: SlotId) -> StoreResult<Vec<SlotRegistrant>> {
        let state = self.state.lock().await;
        let mut rows: Vec<SlotRegistrant> = state
            .registrations
            .iter()
            .filter(|r| r.slot_id == slot_id)
            .filter_map(|r| {
                let user = state.user(r.user_id)?;
                Some(SlotRegistrant {
                    id: r.id,
                    name: user.name.clone(),
                    parish: user.parish.clone(),
                    phone_last_4: user.phone_last_4.clone(),
                    created_at: r.created_at,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_identity(&self, identity: &UserIdentity) -> StoreResult<Option<User>> {
        let parish = identity.parish().as_str();
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .find(|u| {
                u.name == identity.name()
                    && u.parish == parish
                    && u.phone_last_4 == identity.phone_last_4()
            })
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.state.lock().await.user(id).cloned())
    }

    async fn insert(&self, identity: &UserIdentity) -> StoreResult<User> {
        let mut state = self.state.lock().await;
        let parish = identity.parish().as_str();

        if state.users.iter().any(|u| {
            u.name == identity.name()
                && u.parish == parish
                && u.phone_last_4 == identity.phone_last_4()
        }) {
            return Err(StoreError::UniqueViolation {
                constraint: USERS_IDENTITY_KEY.to_string(),
            });
        }

        let user = User {
            id: UserId::new(),
            name: identity.name().to_string(),
            parish: parish.to_string(),
            phone_last_4: identity.phone_last_4().to_string(),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn count_registrations(&self) -> StoreResult<i64> {
        Ok(self.state.lock().await.registrations.len() as i64)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        Ok(self.state.lock().await.users.len() as i64)
    }

    async fn count_registrations_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<i64> {
        Ok(self
            .state
            .lock()
            .await
            .registrations
            .iter()
            .filter(|r| r.created_at >= from && r.created_at < to)
            .count() as i64)
    }

    async fn registrations_by_parish(&self) -> StoreResult<Vec<(String, i64)>> {
        let state = self.state.lock().await;
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for registration in &state.registrations {
            if let Some(user) = state.user(registration.user_id) {
                *counts.entry(user.parish.clone()).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}
