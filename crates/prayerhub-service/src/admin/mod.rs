//! Administrator operations.

pub mod code;
pub mod service;

pub use code::AdminCode;
pub use service::{AdminService, AdminStores, DashboardStats};
