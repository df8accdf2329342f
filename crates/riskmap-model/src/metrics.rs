//! Bottom-up aggregate metrics over a render tree.

use riskmap_core::{RenderNode, SeverityCategory};
use serde::{Deserialize, Serialize};

/// Aggregate metrics computed by [`summarize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMetrics {
    /// Count of all nodes, the synthetic root included.
    pub total_nodes: usize,
    /// Sum of every node's own `total_quantity` field as stored.
    ///
    /// Interior domain nodes carry their own payload, not a running total;
    /// only the synthetic root aggregates its immediate children. The
    /// root's aggregate is therefore intentionally counted here in
    /// addition to the per-node payloads.
    pub total_quantity: i64,
    /// Greatest depth seen (the root is depth 0).
    pub max_depth: u32,
    /// Node count per category, indexed `Low..Critical`.
    pub severity_histogram: [usize; 4],
    /// Mean category weight over all counted nodes.
    pub weighted_average_severity: f64,
}

impl TreeMetrics {
    pub fn count_for(&self, category: SeverityCategory) -> usize {
        self.severity_histogram[category.index()]
    }
}

/// Walk the tree and aggregate its metrics.
pub fn summarize(tree: &RenderNode) -> TreeMetrics {
    let mut metrics = TreeMetrics {
        total_nodes: 0,
        total_quantity: 0,
        max_depth: 0,
        severity_histogram: [0; 4],
        weighted_average_severity: 0.0,
    };
    let mut weight_sum: u64 = 0;

    for node in tree.iter() {
        metrics.total_nodes += 1;
        metrics.total_quantity += node.total_quantity;
        metrics.max_depth = metrics.max_depth.max(node.depth);
        metrics.severity_histogram[node.category.index()] += 1;
        weight_sum += u64::from(node.category.weight());
    }

    metrics.weighted_average_severity = weight_sum as f64 / metrics.total_nodes as f64;
    metrics
}
