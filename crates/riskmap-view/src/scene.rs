//! Integration layer tying the model pipeline to the interactive state.
//!
//! The scene is owned by the host's render loop. It rebuilds the render
//! tree whenever the domain hierarchy, root label or expansion set
//! changes, and translates hit-tested pointer input into events. It never
//! owns the expansion set: toggles only publish candidate sets.

use riskmap_core::{EngineConfig, NodeId, PointerEvent, Rect, RenderNode, RiskNode, Vec2};
use riskmap_events::{Event, EventBus, TooltipInfo};
use riskmap_model::{
    TransformOptions, TreeMetrics, TreeTransformer, expansion, summarize, validate,
};
use std::collections::HashSet;
use std::time::Instant;

use crate::tooltip::TooltipScheduler;
use crate::viewport::ViewportController;

pub struct TreeScene {
    config: EngineConfig,
    bus: EventBus,
    viewport: ViewportController,
    tooltip: TooltipScheduler,
    tree: Option<RenderNode>,
    hovered: Option<NodeId>,
}

impl TreeScene {
    pub fn new(config: EngineConfig, viewport_rect: Rect, bus: EventBus) -> Self {
        let viewport = ViewportController::new(config.clone(), bus.clone());
        let tooltip = TooltipScheduler::new(&config, viewport_rect, bus.clone());
        Self {
            config,
            bus,
            viewport,
            tooltip,
            tree: None,
            hovered: None,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn tree(&self) -> Option<&RenderNode> {
        self.tree.as_ref()
    }

    pub fn viewport(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    pub fn tooltip(&mut self) -> &mut TooltipScheduler {
        &mut self.tooltip
    }

    /// Rebuild the render tree from the domain hierarchy and the
    /// host-owned expansion set. Publishes validation diagnostics when the
    /// tree has any.
    pub fn rebuild(
        &mut self,
        nodes: &[RiskNode],
        root_label: &str,
        expanded: Option<&HashSet<NodeId>>,
    ) {
        let transformer = TreeTransformer::with_options(TransformOptions {
            initial_depth: self.config.initial_depth,
        });
        let built = transformer.transform(nodes, root_label);
        let tree = match expanded {
            Some(set) => expansion::stamp(&built, set),
            None => built,
        };

        let report = validate(&tree);
        if !report.errors.is_empty() || !report.warnings.is_empty() {
            self.bus.publish(Event::ValidationIssues {
                errors: report.errors,
                warnings: report.warnings,
            });
        }

        tracing::debug!(nodes = tree.count(), root = root_label, "render tree rebuilt");
        self.tree = Some(tree);
    }

    /// Aggregate metrics for the current tree.
    pub fn metrics(&self) -> Option<TreeMetrics> {
        self.tree.as_ref().map(summarize)
    }

    /// Toggle a node's expansion, publishing the candidate set. The host
    /// must adopt the set and pass it back on the next rebuild.
    pub fn toggle_expansion(&self, id: &NodeId) {
        let Some(tree) = &self.tree else {
            return;
        };
        let mut expanded: Vec<NodeId> = expansion::toggle(tree, id).into_iter().collect();
        expanded.sort();
        self.bus.publish(Event::ExpansionChanged { expanded });
    }

    /// Report a click on a node (already hit-tested by the renderer).
    /// Unknown ids are ignored: the click may race a rebuild.
    pub fn activate(&self, id: &NodeId, pointer: PointerEvent) {
        let Some(node) = self.tree.as_ref().and_then(|tree| tree.find(id)) else {
            return;
        };
        self.bus.publish(Event::NodeActivated {
            node: node.clone(),
            pointer,
        });
    }

    /// Drive hover state from the renderer's hit testing. `id` is the node
    /// currently under the pointer, if any.
    pub fn hover(&mut self, id: Option<NodeId>, pos: Vec2, now: Instant) {
        if self.hovered != id {
            if let Some(old) = self.hovered.take() {
                self.bus.publish(Event::NodeHoverExit { id: old });
                self.tooltip.pointer_leave(now);
            }
            if let Some(new_id) = &id {
                self.bus.publish(Event::NodeHoverEnter { id: new_id.clone() });
                if let Some(info) = self.tooltip_info(new_id) {
                    self.tooltip.pointer_enter(new_id.clone(), info, pos, now);
                }
            }
            self.hovered = id;
        } else if id.is_some() {
            self.tooltip.pointer_move(pos, now);
        }
        self.tooltip.tick(now);
    }

    /// Pump time-based transitions. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.tooltip.tick(now);
    }

    fn tooltip_info(&self, id: &NodeId) -> Option<TooltipInfo> {
        let node = self.tree.as_ref()?.find(id)?;
        Some(TooltipInfo {
            title: node.name.clone(),
            description: format!(
                "{} severity, {} items ({:.0}%)",
                node.category, node.total_quantity, node.percentage
            ),
        })
    }
}
