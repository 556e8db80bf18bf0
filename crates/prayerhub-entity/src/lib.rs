//! # prayerhub-entity
//!
//! Domain entity models for PrayerHub. Every struct in this crate
//! represents a database table row, a view row, or a domain value object.
//! Database rows additionally derive `sqlx::FromRow`.

pub mod registration;
pub mod settings;
pub mod slot;
pub mod user;
