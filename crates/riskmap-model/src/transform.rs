//! Domain hierarchy → render tree conversion.

use riskmap_core::render::attr;
use riskmap_core::{NodeId, RenderNode, RiskNode, SeverityCategory};
use std::collections::BTreeMap;

/// Quantity at which the magnitude half of the percentage blend saturates.
const QUANTITY_SATURATION: f64 = 50.0;

/// Options controlling a transform pass.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// Collapse nodes deeper than this depth regardless of their domain
    /// `expanded` flag. `None` keeps the domain flags.
    pub initial_depth: Option<u32>,
}

/// Converts a list of domain hierarchy nodes into a single rooted render
/// tree under a synthetic root.
pub struct TreeTransformer {
    options: TransformOptions,
}

impl TreeTransformer {
    pub fn new() -> Self {
        Self {
            options: TransformOptions::default(),
        }
    }

    pub fn with_options(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Build the render tree.
    ///
    /// Top-level domain nodes become children of a synthetic root labelled
    /// `root_label`; the root's value and quantity are the sum of its
    /// children's quantities and its category is derived from the mean of
    /// the children's severity weights (the root has no raw severity of
    /// its own). An empty input yields a root with quantity 0 and
    /// category `Low`.
    pub fn transform(&self, nodes: &[RiskNode], root_label: &str) -> RenderNode {
        let children: Vec<RenderNode> = nodes.iter().map(|node| self.convert(node, 1)).collect();

        let total: i64 = children.iter().map(|child| child.total_quantity).sum();
        let category = if children.is_empty() {
            SeverityCategory::Low
        } else {
            let mean = children
                .iter()
                .map(|child| f64::from(child.category.weight()))
                .sum::<f64>()
                / children.len() as f64;
            SeverityCategory::from_weight(mean)
        };

        let mut attributes = BTreeMap::new();
        attributes.insert(attr::IS_ROOT.to_string(), "true".to_string());
        attributes.insert(attr::CATEGORY.to_string(), category.label().to_string());
        attributes.insert(attr::WEIGHT.to_string(), category.weight().to_string());
        attributes.insert(attr::QUANTITY.to_string(), total.to_string());
        attributes.insert(attr::PERCENTAGE.to_string(), "100".to_string());
        attributes.insert(attr::DEPTH.to_string(), "0".to_string());

        RenderNode {
            name: root_label.to_string(),
            value: total as f64,
            category,
            total_quantity: total,
            percentage: 100.0,
            depth: 0,
            collapsed: false,
            node_id: None,
            attributes,
            children,
        }
    }

    fn convert(&self, node: &RiskNode, depth: u32) -> RenderNode {
        if node.severity.is_unrecognized() {
            tracing::warn!(node = %node.id, "unrecognized severity symbol, treating as low");
        }
        let category = node.severity.classify();
        let percentage = conformity(node.total_quantity, category);
        let collapsed = match self.options.initial_depth {
            Some(limit) if depth > limit => true,
            _ => !node.expanded,
        };

        RenderNode {
            name: node.name.clone(),
            value: node.total_quantity as f64,
            category,
            total_quantity: node.total_quantity,
            percentage,
            depth,
            collapsed,
            node_id: Some(node.id.clone()),
            attributes: build_attributes(&node.id, node, category, percentage, depth),
            children: node
                .children
                .iter()
                .map(|child| self.convert(child, depth + 1))
                .collect(),
        }
    }
}

impl Default for TreeTransformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Blend quantity magnitude and severity weight into a bounded [0, 100]
/// visual magnitude. Half the scale comes from the category weight so a
/// node with few but severe items is visually comparable to one with many
/// mild items.
pub fn conformity(quantity: i64, category: SeverityCategory) -> f64 {
    let magnitude = (quantity.max(0) as f64 / QUANTITY_SATURATION).min(1.0);
    let weight = f64::from(category.weight()) / 4.0;
    (magnitude * 50.0 + weight * 50.0).clamp(0.0, 100.0)
}

fn build_attributes(
    id: &NodeId,
    node: &RiskNode,
    category: SeverityCategory,
    percentage: f64,
    depth: u32,
) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    attributes.insert(attr::NODE_ID.to_string(), id.to_string());
    attributes.insert(attr::CATEGORY.to_string(), category.label().to_string());
    attributes.insert(attr::WEIGHT.to_string(), category.weight().to_string());
    if let Some(raw) = node.severity.raw() {
        attributes.insert(attr::SEVERITY.to_string(), format_number(raw));
    }
    attributes.insert(attr::QUANTITY.to_string(), node.total_quantity.to_string());
    attributes.insert(attr::PERCENTAGE.to_string(), format_number(percentage));
    attributes.insert(attr::DEPTH.to_string(), depth.to_string());
    attributes
}

/// Render a float without a trailing `.0` for whole numbers, matching what
/// attribute-bag consumers expect to display verbatim.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
