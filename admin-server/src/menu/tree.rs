//! Category tree construction and hierarchy checks
//!
//! The menu hierarchy is stored flat (`parent_id` + `menu_level`); the
//! adjacency is derived in memory at read time and never materialized.

use std::collections::{HashMap, HashSet};

use shared::models::{Category, MenuTreeNode};

/// Build the id → parent_id adjacency from category rows.
pub fn parent_map(categories: &[Category]) -> HashMap<String, Option<String>> {
    categories
        .iter()
        .map(|c| (c.id.clone(), c.parent_id.clone()))
        .collect()
}

/// Check whether assigning `new_parent` to `id` would create a cycle.
///
/// Walks up the parent chain from `new_parent`. A visited-set guards
/// against pre-existing corrupt chains so the walk always terminates.
/// A parent missing from `parents` ends the walk (it cannot loop back).
pub fn would_create_cycle(
    id: &str,
    new_parent: Option<&str>,
    parents: &HashMap<String, Option<String>>,
) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = new_parent;

    while let Some(ancestor) = current {
        if ancestor == id {
            return true;
        }
        if !visited.insert(ancestor) {
            // Existing cycle above us; refuse to attach to it
            return true;
        }
        current = parents.get(ancestor).and_then(|p| p.as_deref());
    }

    false
}

/// Nest a flat, already-sorted category list into a tree.
///
/// Input order (menu_order, menu_level, name) is preserved among
/// siblings. A child whose parent is not present in the input (hidden,
/// inactive, or filtered out) is promoted to top level rather than
/// dropped, so the admin view never loses items.
pub fn build_tree(categories: Vec<Category>) -> Vec<MenuTreeNode> {
    let ids: HashSet<String> = categories.iter().map(|c| c.id.clone()).collect();

    // id → child nodes, insertion order preserved by the Vec values
    let mut children: HashMap<String, Vec<MenuTreeNode>> = HashMap::new();
    let mut roots: Vec<MenuTreeNode> = Vec::new();

    // Two passes: collect nodes per parent first, then attach bottom-up.
    // Since children reference parents by id only, we can build leaves
    // into their parents by draining the map in input order.
    let mut order: Vec<String> = Vec::with_capacity(categories.len());
    let mut by_id: HashMap<String, MenuTreeNode> = HashMap::with_capacity(categories.len());

    for category in categories {
        order.push(category.id.clone());
        by_id.insert(
            category.id.clone(),
            MenuTreeNode {
                category,
                children: Vec::new(),
            },
        );
    }

    // Attach deepest-first so every node's children are complete before
    // the node itself moves into its parent. Depth comes from the parent
    // chain rather than the stored menu_level; the flatten sync policy
    // rewrites levels to 0 while keeping parent links intact.
    let adjacency: HashMap<String, Option<String>> = by_id
        .values()
        .map(|n| (n.category.id.clone(), n.category.parent_id.clone()))
        .collect();
    let mut order_by_depth = order.clone();
    order_by_depth.sort_by_key(|id| std::cmp::Reverse(chain_depth(id, &adjacency, &ids)));

    for id in order_by_depth {
        let mut node = match by_id.remove(&id) {
            Some(n) => n,
            None => continue,
        };
        if let Some(kids) = children.remove(&id) {
            node.children = kids;
        }

        match node.category.parent_id.clone() {
            Some(parent) if ids.contains(&parent) && parent != id => {
                children.entry(parent).or_default().push(node);
            }
            // Orphan or top-level: promote to root
            _ => roots.push(node),
        }
    }

    // A parent chain that loops (corrupt data) strands its members in
    // the children map; surface them as roots rather than drop them
    for stranded in children.into_values() {
        roots.extend(stranded);
    }

    // Depth-sorted attachment scrambled root order; restore input order
    let rank: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    roots.sort_by_key(|n| rank.get(n.category.id.as_str()).copied().unwrap_or(usize::MAX));
    for node in &mut roots {
        sort_children(node, &rank);
    }

    roots
}

/// Number of ancestors of `id` within `present`, cycle-safe
fn chain_depth(
    id: &str,
    parents: &HashMap<String, Option<String>>,
    present: &HashSet<String>,
) -> usize {
    let mut depth = 0;
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = parents.get(id).and_then(|p| p.as_deref());
    while let Some(parent) = current {
        if !present.contains(parent) || !visited.insert(parent) {
            break;
        }
        depth += 1;
        current = parents.get(parent).and_then(|p| p.as_deref());
    }
    depth
}

fn sort_children(node: &mut MenuTreeNode, rank: &HashMap<&str, usize>) {
    node.children
        .sort_by_key(|n| rank.get(n.category.id.as_str()).copied().unwrap_or(usize::MAX));
    for child in &mut node.children {
        sort_children(child, rank);
    }
}
