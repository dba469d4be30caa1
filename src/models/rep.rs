//! Representative directory entry.

use serde::{Deserialize, Serialize};

/// A field representative known to the directory.
///
/// The tracking core only reads these; account management lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Representative {
    /// Representative ID (also used as document ID)
    pub id: String,
    /// Name shown in rosters and summaries
    pub display_name: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
}
