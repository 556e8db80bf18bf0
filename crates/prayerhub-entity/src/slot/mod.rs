//! Prayer slot entities.

pub mod model;
pub mod status;

pub use model::{NewSlot, PrayerSlot};
pub use status::SlotStatus;
