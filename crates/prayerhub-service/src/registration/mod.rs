//! Registration admission and cancellation.

pub mod admission;
pub mod cancellation;
pub mod capacity;

pub use admission::{AdmissionController, AdmissionError};
pub use cancellation::{CancellationController, CancellationError};
pub use capacity::{CapacityResolver, seed_global_capacity};
