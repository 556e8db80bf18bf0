//! # prayerhub-service
//!
//! Business logic service layer for PrayerHub. The admission and
//! cancellation controllers own the only real concurrency contract in the
//! system; the remaining services are thin orchestration over the stores.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod admin;
pub mod registration;
pub mod retry;
pub mod slot;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::{AdminCode, AdminService, AdminStores, DashboardStats};
pub use registration::{
    AdmissionController, AdmissionError, CancellationController, CancellationError,
    CapacityResolver, seed_global_capacity,
};
pub use retry::{Attempt, RetryOutcome, RetryPolicy, retry_on_conflict};
pub use slot::SlotService;
pub use user::UserService;
