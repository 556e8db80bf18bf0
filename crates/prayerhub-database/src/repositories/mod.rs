//! PostgreSQL repository implementations of the store contracts.

pub mod registration;
pub mod settings;
pub mod slot;
pub mod stats;
pub mod user;

pub use registration::RegistrationRepository;
pub use settings::SettingsRepository;
pub use slot::SlotRepository;
pub use stats::StatsRepository;
pub use user::UserRepository;
