//! Test doubles shared by the service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use prayerhub_core::traits::Clock;
use prayerhub_core::types::{RegistrationId, SlotId, UserId};
use prayerhub_database::{MemoryStore, RegistrationStore, StoreError, StoreResult, UserStore};
use prayerhub_entity::registration::{Registration, SlotRegistrant, UserRegistration};
use prayerhub_entity::slot::{NewSlot, PrayerSlot};
use prayerhub_entity::user::{User, UserIdentity};

/// Clock that records requested sleeps and advances its own time instead of
/// waiting.
#[derive(Debug)]
pub struct RecordingClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Default for RecordingClock {
    fn default() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap())
    }
}

#[async_trait]
impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        {
            let mut now = self.now.lock().unwrap();
            *now += chrono::Duration::from_std(duration).unwrap();
        }
        tokio::task::yield_now().await;
    }
}

/// Registration store wrapper that can be programmed to fail inserts,
/// lookups and deletes.
#[derive(Debug)]
pub struct FaultyRegistrations {
    inner: MemoryStore,
    unique_failures: AtomicU32,
    backend_failure: AtomicBool,
    lookup_failure: AtomicBool,
    delete_failure: AtomicBool,
    override_on_conflict: Mutex<Option<(SlotId, i32)>>,
    insert_calls: AtomicU32,
}

impl FaultyRegistrations {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            unique_failures: AtomicU32::new(0),
            backend_failure: AtomicBool::new(false),
            lookup_failure: AtomicBool::new(false),
            delete_failure: AtomicBool::new(false),
            override_on_conflict: Mutex::new(None),
            insert_calls: AtomicU32::new(0),
        }
    }

    /// Every `find_owned` fails with a backend error.
    pub fn fail_lookup(&self) {
        self.lookup_failure.store(true, Ordering::SeqCst);
    }

    /// Every `delete` fails with a backend error.
    pub fn fail_delete(&self) {
        self.delete_failure.store(true, Ordering::SeqCst);
    }

    /// On the next injected uniqueness violation, also set the override of
    /// `slot_id` to `max_participants`, like a concurrent operator edit.
    pub fn set_override_on_conflict(&self, slot_id: SlotId, max_participants: i32) {
        *self.override_on_conflict.lock().unwrap() = Some((slot_id, max_participants));
    }

    /// The next `n` inserts fail with a uniqueness violation.
    pub fn fail_unique(&self, n: u32) {
        self.unique_failures.store(n, Ordering::SeqCst);
    }

    /// Every insert fails with a backend error.
    pub fn fail_backend(&self) {
        self.backend_failure.store(true, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> u32 {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistrationStore for FaultyRegistrations {
    async fn insert(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<Registration> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        if self.backend_failure.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        let remaining = self.unique_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.unique_failures.store(remaining - 1, Ordering::SeqCst);
            let edit = self.override_on_conflict.lock().unwrap().take();
            if let Some((slot_id, max)) = edit {
                self.inner.set_slot_override(slot_id, Some(max)).await;
            }
            return Err(StoreError::UniqueViolation {
                constraint: "registrations_user_slot_key".to_string(),
            });
        }
        RegistrationStore::insert(&self.inner, user_id, slot_id).await
    }

    async fn delete(&self, id: RegistrationId, user_id: UserId) -> StoreResult<u64> {
        if self.delete_failure.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        self.inner.delete(id, user_id).await
    }

    async fn exists(&self, user_id: UserId, slot_id: SlotId) -> StoreResult<bool> {
        self.inner.exists(user_id, slot_id).await
    }

    async fn find_owned(
        &self,
        id: RegistrationId,
        user_id: UserId,
    ) -> StoreResult<Option<Registration>> {
        if self.lookup_failure.load(Ordering::SeqCst) {
            return Err(StoreError::backend("connection reset"));
        }
        self.inner.find_owned(id, user_id).await
    }

    async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<UserRegistration>> {
        self.inner.list_for_user(user_id).await
    }

    async fn list_for_slot(&self, slot_id: SlotId) -> StoreResult<Vec<SlotRegistrant>> {
        self.inner.list_for_slot(slot_id).await
    }
}

/// Monday 2025-09-08 at `hour`:00 local time.
pub fn monday_slot(hour: u32) -> NewSlot {
    NewSlot {
        date: NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(),
        start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
    }
}

/// Insert a registrant named `name` into `store`.
pub async fn seed_user(store: &MemoryStore, name: &str) -> User {
    let identity = UserIdentity::parse(name, "1 교구", "1234").unwrap();
    UserStore::insert(store, &identity).await.unwrap()
}

/// Insert a Monday 07:00 slot with the given override.
pub async fn seed_slot(store: &MemoryStore, max_participants: Option<i32>) -> PrayerSlot {
    store.seed_slot(monday_slot(7), max_participants).await
}
