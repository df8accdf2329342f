use crate::severity::SeverityCategory;
use crate::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys of the flat attribute projection on [`RenderNode`].
pub mod attr {
    pub const NODE_ID: &str = "nodeId";
    pub const CATEGORY: &str = "severityCategory";
    pub const WEIGHT: &str = "severityWeight";
    pub const SEVERITY: &str = "severity";
    pub const QUANTITY: &str = "totalQuantity";
    pub const PERCENTAGE: &str = "percentage";
    pub const DEPTH: &str = "depth";
    pub const IS_ROOT: &str = "isRoot";
}

/// A node of the renderable tree.
///
/// Built once per transform pass and treated as immutable afterwards:
/// expansion and viewport changes produce new derived values, never
/// in-place mutation. `depth` strictly increases by 1 from parent to
/// child; the synthetic root has depth 0 and no `node_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub name: String,
    /// Visual magnitude; mirrors `total_quantity` (the root carries the
    /// sum of its children).
    pub value: f64,
    pub category: SeverityCategory,
    pub total_quantity: i64,
    /// Bounded [0, 100] blend of quantity and severity weight.
    pub percentage: f64,
    pub depth: u32,
    pub collapsed: bool,
    /// `None` only for the synthetic root.
    pub node_id: Option<NodeId>,
    /// Flat key/value projection of the typed fields for consumers that
    /// only understand untyped attribute bags. Derived at construction;
    /// the typed fields are the source of truth.
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    /// True for the synthetic root produced by the transformer.
    pub fn is_root(&self) -> bool {
        self.node_id.is_none()
    }

    /// Deterministic depth-first pre-order traversal, self first.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }

    /// Total number of nodes in this subtree, self included.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Find a node by id anywhere in this subtree.
    pub fn find(&self, id: &NodeId) -> Option<&RenderNode> {
        self.iter().find(|node| node.node_id.as_ref() == Some(id))
    }
}

/// Depth-first pre-order traversal over a render tree.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a RenderNode>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a RenderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // push children in reverse so the leftmost child is visited first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str, name: &str) -> RenderNode {
        RenderNode {
            name: name.to_string(),
            value: 0.0,
            category: SeverityCategory::Low,
            total_quantity: 0,
            percentage: 0.0,
            depth: 1,
            collapsed: false,
            node_id: Some(NodeId::from(id)),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    fn sample_tree() -> RenderNode {
        let mut left = leaf("a", "A");
        left.children = vec![
            {
                let mut n = leaf("a1", "A1");
                n.depth = 2;
                n
            },
            {
                let mut n = leaf("a2", "A2");
                n.depth = 2;
                n
            },
        ];
        RenderNode {
            name: "root".to_string(),
            value: 0.0,
            category: SeverityCategory::Low,
            total_quantity: 0,
            percentage: 100.0,
            depth: 0,
            collapsed: false,
            node_id: None,
            attributes: BTreeMap::new(),
            children: vec![left, leaf("b", "B")],
        }
    }

    #[test]
    fn test_pre_order_is_deterministic() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["root", "A", "A1", "A2", "B"]);
        assert_eq!(tree.count(), 5);
    }

    #[test]
    fn test_find_by_id() {
        let tree = sample_tree();
        assert_eq!(tree.find(&NodeId::from("a2")).unwrap().name, "A2");
        assert!(tree.find(&NodeId::from("zzz")).is_none());
        assert!(tree.is_root());
        assert!(!tree.children[0].is_root());
    }
}
