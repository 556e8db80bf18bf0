//! Registration entities.

pub mod model;
pub mod views;

pub use model::Registration;
pub use views::{SlotRegistrant, UserRegistration};
