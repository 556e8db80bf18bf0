//! Core type definitions used across the PrayerHub workspace.

pub mod capacity;
pub mod id;

pub use capacity::Capacity;
pub use id::*;
