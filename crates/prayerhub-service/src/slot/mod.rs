//! Slot listing and materialization.

pub mod service;

pub use service::SlotService;
