//! Dashboard statistics, global capacity, and slot inspection.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use tracing::info;

use prayerhub_core::error::AppError;
use prayerhub_core::traits::Clock;
use prayerhub_core::types::SlotId;
use prayerhub_database::{RegistrationStore, SettingsStore, SlotStore, StatsStore, StoreError};
use prayerhub_entity::registration::SlotRegistrant;
use prayerhub_entity::settings::{GlobalSetting, MAX_PARTICIPANTS_PER_SLOT};
use prayerhub_entity::slot::SlotStatus;

use super::code::AdminCode;

/// Aggregate numbers shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All registrations.
    pub total_registrations: i64,
    /// All registrants.
    pub total_users: i64,
    /// Registrations admitted since local midnight.
    pub today_registrations: i64,
    /// Registration counts keyed by parish label.
    pub parish_stats: BTreeMap<String, i64>,
}

/// The stores the admin service reads.
#[derive(Debug, Clone)]
pub struct AdminStores {
    /// Slot store.
    pub slots: Arc<dyn SlotStore>,
    /// Registration store.
    pub registrations: Arc<dyn RegistrationStore>,
    /// Settings store.
    pub settings: Arc<dyn SettingsStore>,
    /// Aggregates.
    pub stats: Arc<dyn StatsStore>,
}

/// Administrator operations.
#[derive(Debug, Clone)]
pub struct AdminService {
    /// Backing stores.
    stores: AdminStores,
    /// Configured administrator code.
    code: AdminCode,
    /// Time source for "today".
    clock: Arc<dyn Clock>,
    /// Offset defining local midnight.
    offset: FixedOffset,
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        stores: AdminStores,
        code: AdminCode,
        clock: Arc<dyn Clock>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            stores,
            code,
            clock,
            offset,
        }
    }

    /// Check a candidate administrator code.
    pub fn verify_code(&self, candidate: &str) -> Result<(), AppError> {
        self.code.verify(candidate)
    }

    /// Dashboard statistics.
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let failed =
            |message: &'static str| move |e: StoreError| AppError::from(e).with_message(message);

        let total_registrations = self
            .stores
            .stats
            .count_registrations()
            .await
            .map_err(failed("총 신청 건수를 불러오는데 실패했습니다."))?;
        let total_users = self
            .stores
            .stats
            .count_users()
            .await
            .map_err(failed("총 사용자 수를 불러오는데 실패했습니다."))?;
        let parish_stats = self
            .stores
            .stats
            .registrations_by_parish()
            .await
            .map_err(failed("교구별 현황을 불러오는데 실패했습니다."))?
            .into_iter()
            .collect();

        let (from, to) = local_day_bounds(self.clock.now(), self.offset);
        let today_registrations = self
            .stores
            .stats
            .count_registrations_between(from, to)
            .await
            .map_err(failed("통계 정보를 불러오는데 실패했습니다."))?;

        Ok(DashboardStats {
            total_registrations,
            total_users,
            today_registrations,
            parish_stats,
        })
    }

    /// The global per-slot capacity setting.
    pub async fn global_capacity(&self) -> Result<i32, AppError> {
        self.stores
            .settings
            .get_int(MAX_PARTICIPANTS_PER_SLOT)
            .await
            .map_err(|e| AppError::from(e).with_message("설정을 불러오는데 실패했습니다."))?
            .ok_or_else(|| AppError::not_found("설정을 찾을 수 없습니다."))
    }

    /// Set the global per-slot capacity. Must be at least 1.
    pub async fn update_global_capacity(&self, value: i32) -> Result<GlobalSetting, AppError> {
        if value < 1 {
            return Err(AppError::validation(
                "유효하지 않은 값입니다. 1 이상의 숫자를 입력해주세요.",
            ));
        }

        let setting = self
            .stores
            .settings
            .set_int(MAX_PARTICIPANTS_PER_SLOT, value)
            .await
            .map_err(|e| AppError::from(e).with_message("설정 수정에 실패했습니다."))?
            .ok_or_else(|| AppError::not_found("설정을 찾을 수 없습니다."))?;

        info!(value, "Global slot capacity updated");
        Ok(setting)
    }

    /// Slot statuses on `date` without materializing missing slots.
    pub async fn slots_on(&self, date: NaiveDate) -> Result<Vec<SlotStatus>, AppError> {
        self.stores
            .slots
            .list_status_by_date(date)
            .await
            .map_err(|e| AppError::from(e).with_message("시간대 정보를 불러오는데 실패했습니다."))
    }

    /// Registrants of `slot_id` in admission order.
    pub async fn slot_registrants(&self, slot_id: SlotId) -> Result<Vec<SlotRegistrant>, AppError> {
        self.stores
            .slots
            .find_slot(slot_id)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 시간대입니다."))?;

        self.stores
            .registrations
            .list_for_slot(slot_id)
            .await
            .map_err(|e| AppError::from(e).with_message("신청자 목록을 불러오는데 실패했습니다."))
    }
}

/// `[local midnight, next local midnight)` of the day containing `now`,
/// expressed in UTC.
fn local_day_bounds(now: DateTime<Utc>, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&offset).date_naive();
    let start_of = |date: NaiveDate| {
        offset
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
            .map_or_else(|| date.and_time(NaiveTime::MIN).and_utc(), |dt| dt.with_timezone(&Utc))
    };
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    (start_of(today), start_of(tomorrow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prayerhub_core::error::ErrorKind;
    use prayerhub_database::MemoryStore;

    use crate::testing::{RecordingClock, seed_slot, seed_user};

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn service(store: &MemoryStore) -> AdminService {
        let stores = AdminStores {
            slots: Arc::new(store.clone()),
            registrations: Arc::new(store.clone()),
            settings: Arc::new(store.clone()),
            stats: Arc::new(store.clone()),
        };
        AdminService::new(
            stores,
            AdminCode::new("code"),
            Arc::new(RecordingClock::at(Utc::now())),
            kst(),
        )
    }

    #[test]
    fn test_local_day_bounds_in_kst() {
        // 2025-09-08 01:00 KST
        let now = Utc.with_ymd_and_hms(2025, 9, 7, 16, 0, 0).unwrap();
        let (from, to) = local_day_bounds(now, kst());
        assert_eq!(from, Utc.with_ymd_and_hms(2025, 9, 7, 15, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2025, 9, 8, 15, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_stats_count_everything() {
        let store = MemoryStore::new();
        let slot = seed_slot(&store, None).await;
        let a = seed_user(&store, "a").await;
        let b = seed_user(&store, "b").await;
        RegistrationStore::insert(&store, a.id, slot.id).await.unwrap();
        RegistrationStore::insert(&store, b.id, slot.id).await.unwrap();

        let stats = service(&store).stats().await.unwrap();
        assert_eq!(stats.total_registrations, 2);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.today_registrations, 2);
        assert_eq!(stats.parish_stats.get("1 교구"), Some(&2));
    }

    #[tokio::test]
    async fn test_update_global_capacity_rejects_zero() {
        let store = MemoryStore::new();
        let err = service(&store).update_global_capacity(0).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            store.get_int(MAX_PARTICIPANTS_PER_SLOT).await.unwrap(),
            Some(10)
        );
    }

    #[tokio::test]
    async fn test_update_global_capacity_persists() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let updated = svc.update_global_capacity(25).await.unwrap();
        assert_eq!(updated.setting_value, 25);
        assert_eq!(svc.global_capacity().await.unwrap(), 25);
    }

    #[tokio::test]
    async fn test_slot_registrants() {
        let store = MemoryStore::new();
        let slot = seed_slot(&store, None).await;
        let user = seed_user(&store, "김철수").await;
        RegistrationStore::insert(&store, user.id, slot.id).await.unwrap();

        let svc = service(&store);
        let registrants = svc.slot_registrants(slot.id).await.unwrap();
        assert_eq!(registrants.len(), 1);
        assert_eq!(registrants[0].name, "김철수");

        let err = svc.slot_registrants(SlotId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
