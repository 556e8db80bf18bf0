//! Core traits defined in `prayerhub-core` and implemented by other crates.

pub mod clock;

pub use clock::{Clock, SystemClock};
