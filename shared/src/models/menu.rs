//! Menu payloads
//!
//! Request/response types for the menu management endpoints: reorder,
//! sync, visibility toggle and the nested tree view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Category;

/// One entry of a reorder batch
///
/// The client submits the complete desired order of its view, renumbered
/// 0..N-1 after a drag-drop move.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub id: String,
    pub menu_order: i32,
    /// Depth in the menu hierarchy after the move
    #[validate(range(min = 0))]
    pub level: i32,
    pub parent_id: Option<String>,
    pub show_in_menu: bool,
}

/// Reorder request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReorderRequest {
    #[validate(length(min = 1), nested)]
    pub items: Vec<ReorderItem>,
}

/// Visibility toggle request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVisibility {
    pub show_in_menu: bool,
}

/// Result summary of a menu sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    /// Number of categories touched by the sync
    pub total_categories: u64,
    pub synced_at: DateTime<Utc>,
}

/// One node of the nested menu tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTreeNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<MenuTreeNode>,
}
