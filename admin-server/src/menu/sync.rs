//! Sync policy
//!
//! The sync endpoint copies `sort_order` into `menu_order` and marks
//! every active category visible in one bulk statement. What happens to
//! `menu_level` is a policy decision: the legacy behavior flattened the
//! whole hierarchy to level 0, which erases nesting set up through the
//! reorder endpoint. The policy is explicit configuration, never implied.

use std::fmt;
use std::str::FromStr;

/// What the menu sync does to `menu_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncLevelPolicy {
    /// Keep each category's current `menu_level` (default)
    #[default]
    Preserve,
    /// Reset every active category to `menu_level = 0` (legacy behavior)
    Flatten,
}

impl FromStr for SyncLevelPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "flatten" => Ok(Self::Flatten),
            other => Err(format!(
                "Unknown sync level policy '{other}' (expected 'preserve' or 'flatten')"
            )),
        }
    }
}

impl fmt::Display for SyncLevelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preserve => write!(f, "preserve"),
            Self::Flatten => write!(f, "flatten"),
        }
    }
}
