//! Shared application state passed to every handler.

use std::sync::Arc;
use std::time::Instant;

use prayerhub_core::config::AppConfig;
use prayerhub_core::traits::Clock;
use prayerhub_database::Stores;
use prayerhub_service::{
    AdminCode, AdminService, AdminStores, AdmissionController, CancellationController,
    CapacityResolver, RetryPolicy, SlotService, UserService,
};

/// Application state, cloned into every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Registrant service.
    pub user_service: Arc<UserService>,
    /// Slot listing service.
    pub slot_service: Arc<SlotService>,
    /// Admission controller.
    pub admission: Arc<AdmissionController>,
    /// Cancellation controller.
    pub cancellation: Arc<CancellationController>,
    /// Administrator service.
    pub admin_service: Arc<AdminService>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Wire every service onto `stores`.
    pub fn new(config: AppConfig, stores: Stores, clock: Arc<dyn Clock>) -> Self {
        let registration = &config.registration;
        let offset = registration.local_offset();

        let capacity = CapacityResolver::new(Arc::clone(&stores.settings));

        let admission = AdmissionController::new(
            Arc::clone(&stores.slots),
            Arc::clone(&stores.registrations),
            capacity,
            Arc::clone(&clock),
            RetryPolicy::from(&registration.retry),
        );

        let cancellation = CancellationController::new(
            Arc::clone(&stores.slots),
            Arc::clone(&stores.registrations),
            Arc::clone(&clock),
            offset,
        );

        let user_service = UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.registrations),
            Arc::clone(&clock),
            offset,
        );

        let slot_service = SlotService::new(Arc::clone(&stores.slots), registration.clone());

        let admin_service = AdminService::new(
            AdminStores {
                slots: Arc::clone(&stores.slots),
                registrations: Arc::clone(&stores.registrations),
                settings: Arc::clone(&stores.settings),
                stats: Arc::clone(&stores.stats),
            },
            AdminCode::new(&config.admin.code),
            clock,
            offset,
        );

        Self {
            config: Arc::new(config),
            user_service: Arc::new(user_service),
            slot_service: Arc::new(slot_service),
            admission: Arc::new(admission),
            cancellation: Arc::new(cancellation),
            admin_service: Arc::new(admin_service),
            started_at: Instant::now(),
        }
    }
}
