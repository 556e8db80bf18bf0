//! # prayerhub-database
//!
//! PostgreSQL connection management, the store contracts the service
//! layer is written against, and their PostgreSQL and in-memory
//! implementations.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{RegistrationStore, SettingsStore, SlotStore, StatsStore, Stores, UserStore};
