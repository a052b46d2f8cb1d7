//! Category forest helpers.
//!
//! # Design
//! - The server owns the forest; the client only prunes what it cannot
//!   render safely (cycles, absurd depth) instead of rejecting the payload.
//! - Lookups are recursive over the node's `sub_categories`, matching the
//!   shape the tree view renders.

use crate::features::categories::state::{MAX_TREE_DEPTH, UNSELECTED_PARENT};
use vitrine_api_models::Category;

/// Whether an id names a real category (non-empty and not the sentinel).
#[must_use]
pub fn is_valid_category_id(id: &str) -> bool {
    !id.is_empty() && id != UNSELECTED_PARENT
}

/// Drop nodes that would make the forest unsafe to render: anything deeper
/// than [`MAX_TREE_DEPTH`] and any node whose id already occurs on its own
/// ancestor path (a server-side cycle flattened into the payload).
#[must_use]
pub fn sanitize_forest(forest: Vec<Category>) -> Vec<Category> {
    let mut path = Vec::new();
    forest
        .into_iter()
        .filter_map(|node| prune(node, 0, &mut path))
        .collect()
}

fn prune(mut node: Category, depth: usize, path: &mut Vec<String>) -> Option<Category> {
    if depth >= MAX_TREE_DEPTH || path.iter().any(|id| *id == node.id) {
        return None;
    }
    path.push(node.id.clone());
    let children = std::mem::take(&mut node.sub_categories);
    node.sub_categories = children
        .into_iter()
        .filter_map(|child| prune(child, depth + 1, path))
        .collect();
    path.pop();
    Some(node)
}

/// Immediate children of `id` anywhere in the forest.
#[must_use]
pub fn children_of<'a>(forest: &'a [Category], id: &str) -> Option<&'a [Category]> {
    for node in forest {
        if node.id == id {
            return Some(&node.sub_categories);
        }
        if let Some(found) = children_of(&node.sub_categories, id) {
            return Some(found);
        }
    }
    None
}

/// Replace the children of `parent_id` in place. Returns `false` when the
/// parent is not part of the forest (e.g. it was deleted by another session).
pub fn graft_children(forest: &mut [Category], parent_id: &str, children: &[Category]) -> bool {
    for node in forest.iter_mut() {
        if node.id == parent_id {
            node.sub_categories = children.to_vec();
            return true;
        }
        if graft_children(&mut node.sub_categories, parent_id, children) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::{children_of, graft_children, is_valid_category_id, sanitize_forest};
    use vitrine_api_models::Category;

    fn node(id: &str, children: Vec<Category>) -> Category {
        Category {
            id: id.to_string(),
            key: id.to_string(),
            label: id.to_uppercase(),
            sub_categories: children,
        }
    }

    #[test]
    fn sentinel_and_empty_ids_are_invalid() {
        assert!(!is_valid_category_id(""));
        assert!(!is_valid_category_id("0"));
        assert!(is_valid_category_id("17"));
    }

    #[test]
    fn sanitize_cuts_nodes_repeated_on_their_own_path() {
        // "1" reappears under itself: the inner copy goes, the sibling stays.
        let forest = vec![node(
            "1",
            vec![node("2", vec![node("1", vec![]), node("3", vec![])])],
        )];
        let clean = sanitize_forest(forest);
        let inner = children_of(&clean, "2").expect("node 2 kept");
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].id, "3");
    }

    #[test]
    fn sanitize_keeps_duplicate_ids_on_disjoint_branches() {
        let forest = vec![node("1", vec![node("3", vec![])]), node("2", vec![node("3", vec![])])];
        let clean = sanitize_forest(forest);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean[0].sub_categories.len(), 1);
        assert_eq!(clean[1].sub_categories.len(), 1);
    }

    #[test]
    fn sanitize_enforces_the_depth_cap() {
        let mut deep = node("leaf", vec![]);
        for index in 0..64 {
            deep = node(&format!("n{index}"), vec![deep]);
        }
        let clean = sanitize_forest(vec![deep]);
        let mut depth = 0;
        let mut cursor = &clean[0];
        while let Some(first) = cursor.sub_categories.first() {
            depth += 1;
            cursor = first;
        }
        assert!(depth < super::MAX_TREE_DEPTH);
    }

    #[test]
    fn children_lookup_descends_the_forest() {
        let forest = vec![node("1", vec![node("2", vec![node("4", vec![])])])];
        assert_eq!(children_of(&forest, "2").map(<[Category]>::len), Some(1));
        assert!(children_of(&forest, "9").is_none());
    }

    #[test]
    fn graft_replaces_children_in_place() {
        let mut forest = vec![node("1", vec![node("2", vec![])])];
        assert!(graft_children(&mut forest, "2", &[node("5", vec![])]));
        assert_eq!(children_of(&forest, "2").map(<[Category]>::len), Some(1));
        assert!(!graft_children(&mut forest, "missing", &[]));
    }
}
