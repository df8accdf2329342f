//! Synchronization between the render tree's collapsed flags and the
//! externally-owned expansion set.
//!
//! The host owns the canonical `HashSet<NodeId>`; the engine never mutates
//! it. [`stamp`] derives a tree from a set, [`extract`] derives a set from
//! a tree, and the two are inverse up to nodes without an id (the
//! synthetic root), which are always treated as expanded and excluded
//! from extraction.

use riskmap_core::{NodeId, RenderNode};
use std::collections::HashSet;

/// Return a structurally new tree where every identified node's
/// `collapsed` flag is recomputed from membership in `expanded`. Nodes
/// without an id stay expanded.
pub fn stamp(tree: &RenderNode, expanded: &HashSet<NodeId>) -> RenderNode {
    let mut stamped = tree.clone();
    stamp_in_place(&mut stamped, expanded);
    stamped
}

fn stamp_in_place(node: &mut RenderNode, expanded: &HashSet<NodeId>) {
    node.collapsed = match &node.node_id {
        Some(id) => !expanded.contains(id),
        None => false,
    };
    for child in &mut node.children {
        stamp_in_place(child, expanded);
    }
}

/// Collect the ids of all currently expanded (not collapsed) nodes.
pub fn extract(tree: &RenderNode) -> HashSet<NodeId> {
    tree.iter()
        .filter(|node| !node.collapsed)
        .filter_map(|node| node.node_id.clone())
        .collect()
}

/// Candidate expansion set produced by toggling a single node: the tree's
/// current set with `id` added or removed. The tree itself is untouched.
pub fn toggle(tree: &RenderNode, id: &NodeId) -> HashSet<NodeId> {
    let mut expanded = extract(tree);
    if !expanded.remove(id) {
        expanded.insert(id.clone());
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TreeTransformer;
    use riskmap_core::RiskNode;

    fn sample_tree() -> RenderNode {
        let mut a = RiskNode::new("a", "Ops");
        a.children = vec![RiskNode::new("a1", "Logistics")];
        let mut b = RiskNode::new("b", "Fin");
        b.expanded = false;
        TreeTransformer::new().transform(&[a, b], "Portfolio")
    }

    fn ids(values: &[&str]) -> HashSet<NodeId> {
        values.iter().map(|v| NodeId::from(*v)).collect()
    }

    #[test]
    fn test_stamp_recomputes_all_flags() {
        let tree = sample_tree();
        let stamped = stamp(&tree, &ids(&["b"]));

        assert!(!stamped.collapsed, "root has no id and stays expanded");
        assert!(stamped.children[0].collapsed);
        assert!(stamped.children[0].children[0].collapsed);
        assert!(!stamped.children[1].collapsed);
        // input tree untouched
        assert!(!tree.children[0].collapsed);
    }

    #[test]
    fn test_extract_skips_collapsed_and_unidentified() {
        let tree = sample_tree();
        let expanded = extract(&tree);
        assert_eq!(expanded, ids(&["a", "a1"]));
    }

    #[test]
    fn test_toggle_produces_candidate_without_mutation() {
        let tree = sample_tree();
        let with_b = toggle(&tree, &NodeId::from("b"));
        assert_eq!(with_b, ids(&["a", "a1", "b"]));
        let without_a = toggle(&tree, &NodeId::from("a"));
        assert_eq!(without_a, ids(&["a1"]));
        // the tree still reflects the original flags
        assert!(tree.children[1].collapsed);
    }

    #[test]
    fn test_round_trip_restricted_to_known_ids() {
        let tree = sample_tree();
        // "zz" does not exist in the tree and is lost by the round trip
        let requested = ids(&["a1", "b", "zz"]);
        let recovered = extract(&stamp(&tree, &requested));
        assert_eq!(recovered, ids(&["a1", "b"]));
    }

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_domain_tree(depth: u32) -> BoxedStrategy<RiskNode> {
            let leaf = "[a-z][a-z0-9]{0,6}".prop_map(|id| {
                let name = format!("node {id}");
                RiskNode::new(id, name)
            });
            if depth == 0 {
                leaf.boxed()
            } else {
                (
                    "[a-z][a-z0-9]{0,6}",
                    proptest::collection::vec(arb_domain_tree(depth - 1), 0..3),
                )
                    .prop_map(|(id, children)| {
                        let name = format!("node {id}");
                        let mut node = RiskNode::new(id, name);
                        node.children = children;
                        node
                    })
                    .boxed()
            }
        }

        proptest! {
            /// extract(stamp(t, s)) == s restricted to ids present in t.
            #[test]
            fn round_trip_law(
                roots in proptest::collection::vec(arb_domain_tree(2), 0..4),
                requested in proptest::collection::hash_set("[a-z][a-z0-9]{0,6}", 0..8),
            ) {
                let tree = TreeTransformer::new().transform(&roots, "root");
                let requested: HashSet<NodeId> =
                    requested.into_iter().map(NodeId::from).collect();

                let present: HashSet<NodeId> = tree
                    .iter()
                    .filter_map(|node| node.node_id.clone())
                    .collect();
                let expected: HashSet<NodeId> =
                    requested.intersection(&present).cloned().collect();

                prop_assert_eq!(extract(&stamp(&tree, &requested)), expected);
            }
        }
    }
}
