//! Reorder batch validation
//!
//! The client submits the complete desired order of its view. Before
//! anything is written, the batch is checked against current rows so a
//! bad batch never partially applies.

use std::collections::{HashMap, HashSet};

use shared::models::ReorderItem;

use super::MenuError;
use super::tree::would_create_cycle;

/// Validate a reorder batch against the current id → parent adjacency.
///
/// Rules:
/// - batch must be non-empty and free of duplicate ids;
/// - every referenced category id must exist;
/// - every submitted `parent_id` must reference an existing category;
/// - the submitted parent assignments, merged over current rows, must
///   stay cycle-free.
pub fn validate_batch(
    items: &[ReorderItem],
    current: &HashMap<String, Option<String>>,
) -> Result<(), MenuError> {
    if items.is_empty() {
        return Err(MenuError::EmptyBatch);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(MenuError::DuplicateId(item.id.clone()));
        }
        if !current.contains_key(item.id.as_str()) {
            return Err(MenuError::UnknownCategory(item.id.clone()));
        }
        if let Some(parent) = &item.parent_id
            && !current.contains_key(parent.as_str())
        {
            return Err(MenuError::UnknownParent(parent.clone()));
        }
    }

    // Merge the submitted assignments over the current adjacency, then
    // re-check every moved item
    let mut merged = current.clone();
    for item in items {
        merged.insert(item.id.clone(), item.parent_id.clone());
    }
    for item in items {
        if would_create_cycle(&item.id, item.parent_id.as_deref(), &merged) {
            return Err(MenuError::Cycle(item.id.clone()));
        }
    }

    Ok(())
}
