//! Registrant entities.

pub mod identity;
pub mod model;
pub mod parish;

pub use identity::UserIdentity;
pub use model::User;
pub use parish::Parish;
