//! Structural and value validation over a render tree.
//!
//! Validation never mutates and never blocks rendering by itself: the
//! report is handed to the host, which decides whether to display the
//! tree. Traversal is pre-order so messages are reproducible.

use riskmap_core::render::attr;
use riskmap_core::{RenderNode, SeverityCategory};
use serde::{Deserialize, Serialize};

/// Expected display range for raw severity values.
const SEVERITY_DISPLAY_MIN: f64 = 0.0;
const SEVERITY_DISPLAY_MAX: f64 = 100.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Fatal structural problems.
    pub errors: Vec<String>,
    /// Out-of-range values; never affect validity.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a render tree.
pub fn validate(tree: &RenderNode) -> ValidationReport {
    let mut report = ValidationReport::default();
    let root_label = if tree.name.trim().is_empty() {
        "(root)".to_string()
    } else {
        tree.name.clone()
    };
    visit(tree, &root_label, &mut report);
    report
}

fn visit(node: &RenderNode, path: &str, report: &mut ValidationReport) {
    if node.name.trim().is_empty() {
        report.errors.push(format!("{path}: node name is empty"));
    }
    if node.total_quantity < 0 {
        report.errors.push(format!(
            "{path}: negative quantity {}",
            node.total_quantity
        ));
    }
    // the attribute bag is what downstream custom renderers consume, so its
    // category string is validated even though the typed field cannot be
    // out of range
    if let Some(raw) = node.attributes.get(attr::CATEGORY) {
        if raw.parse::<SeverityCategory>().is_err() {
            report.errors.push(format!(
                "{path}: severity category {raw:?} is not one of low/medium/high/critical"
            ));
        }
    }

    if let Some(severity) = node
        .attributes
        .get(attr::SEVERITY)
        .and_then(|value| value.parse::<f64>().ok())
    {
        if !(SEVERITY_DISPLAY_MIN..=SEVERITY_DISPLAY_MAX).contains(&severity) {
            report.warnings.push(format!(
                "{path}: severity {severity} outside display range [{SEVERITY_DISPLAY_MIN}, {SEVERITY_DISPLAY_MAX}]"
            ));
        }
    }
    if !(0.0..=100.0).contains(&node.percentage) {
        report.warnings.push(format!(
            "{path}: percentage {} outside [0, 100]",
            node.percentage
        ));
    }

    for (index, child) in node.children.iter().enumerate() {
        if child.depth != node.depth + 1 {
            report.errors.push(format!(
                "{path}: child {index} has depth {} (expected {})",
                child.depth,
                node.depth + 1
            ));
        }
        let segment = if child.name.trim().is_empty() {
            format!("[{index}]")
        } else {
            child.name.clone()
        };
        let child_path = format!("{path}.{segment}");
        visit(child, &child_path, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TreeTransformer;
    use riskmap_core::{RiskNode, SeverityValue};

    fn build(nodes: &[RiskNode]) -> RenderNode {
        TreeTransformer::new().transform(nodes, "Portfolio")
    }

    fn node(id: &str, name: &str, severity: f64, quantity: i64) -> RiskNode {
        RiskNode {
            severity: SeverityValue::Raw(severity),
            total_quantity: quantity,
            ..RiskNode::new(id, name)
        }
    }

    #[test]
    fn test_well_formed_tree_is_valid() {
        let tree = build(&[node("a", "Ops", 22.0, 5), node("b", "Fin", 3.0, 2)]);
        let report = validate(&tree);
        assert!(report.is_valid());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_negative_quantity_is_fatal() {
        let tree = build(&[node("a", "Ops", 5.0, -1)]);
        let report = validate(&tree);
        assert!(!report.is_valid());
        assert!(!report.errors.is_empty());
        assert!(report.errors[0].contains("negative quantity"));
    }

    #[test]
    fn test_out_of_range_percentage_is_only_a_warning() {
        let mut tree = build(&[node("a", "Ops", 5.0, 1)]);
        tree.children[0].percentage = 150.0;
        let report = validate(&tree);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("percentage 150"));
    }

    #[test]
    fn test_out_of_range_severity_is_only_a_warning() {
        let tree = build(&[node("a", "Ops", 250.0, 1)]);
        let report = validate(&tree);
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("display range")));
    }

    #[test]
    fn test_empty_name_is_fatal_with_indexed_path() {
        let tree = build(&[node("a", "", 5.0, 1)]);
        let report = validate(&tree);
        assert!(!report.is_valid());
        assert!(report.errors[0].starts_with("Portfolio.[0]:"));
    }

    #[test]
    fn test_corrupt_category_attribute_is_fatal() {
        let mut tree = build(&[node("a", "Ops", 5.0, 1)]);
        tree.children[0]
            .attributes
            .insert("severityCategory".to_string(), "catastrophic".to_string());
        let report = validate(&tree);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("catastrophic"));
    }

    #[test]
    fn test_paths_are_dotted_from_root() {
        let mut parent = node("a", "Ops", 5.0, 1);
        parent.children = vec![node("a1", "Logistics", 5.0, -2)];
        let tree = build(&[parent]);
        let report = validate(&tree);
        assert!(report.errors[0].starts_with("Portfolio.Ops.Logistics:"));
    }

    #[test]
    fn test_depth_invariant_violation_is_fatal() {
        let mut tree = build(&[node("a", "Ops", 5.0, 1)]);
        tree.children[0].depth = 5;
        let report = validate(&tree);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("depth"));
    }
}
