//! Admin gate configuration.

use serde::{Deserialize, Serialize};

/// Admin gate settings.
///
/// Admin endpoints compare the `x-admin-code` request header against
/// `code`. An empty code disables the admin API entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared admin code.
    #[serde(default)]
    pub code: String,
}
