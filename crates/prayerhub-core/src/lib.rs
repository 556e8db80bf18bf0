//! # prayerhub-core
//!
//! Core crate for PrayerHub. Contains configuration schemas, typed
//! identifiers, the slot capacity model, the clock abstraction used by
//! retry loops, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PrayerHub crates.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::AppError;
