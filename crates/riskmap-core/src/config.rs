use crate::severity::SeverityCategory;
use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Every field is optional in serialized form and falls back to the
/// documented default; unknown option values never fail decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Collapse nodes deeper than this on the first build. `None` keeps
    /// the domain `expanded` flags as-is.
    pub initial_depth: Option<u32>,
    pub zoom_extent: ZoomExtent,
    /// Multiplier applied to pointer deltas while drag-panning.
    pub pan_sensitivity: f32,
    /// Zoom applied per wheel notch.
    pub zoom_sensitivity: f32,
    pub enable_keyboard_navigation: bool,
    pub enable_wheel_zoom: bool,
    pub enable_drag_pan: bool,
    /// Delay before a hover tooltip appears, in milliseconds.
    #[serde(rename = "showDelay")]
    pub show_delay_ms: u64,
    /// Delay before a tooltip disappears after pointer-leave, in milliseconds.
    #[serde(rename = "hideDelay")]
    pub hide_delay_ms: u64,
    /// Keep the shown tooltip tracking the pointer.
    pub follow_mouse: bool,
    pub node_sizing: NodeSizing,
    pub color_overrides: ColorOverrides,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_depth: None,
            zoom_extent: ZoomExtent::default(),
            pan_sensitivity: 1.0,
            zoom_sensitivity: default_zoom_sensitivity(),
            enable_keyboard_navigation: true,
            enable_wheel_zoom: true,
            enable_drag_pan: true,
            show_delay_ms: default_show_delay_ms(),
            hide_delay_ms: default_hide_delay_ms(),
            follow_mouse: false,
            node_sizing: NodeSizing::default(),
            color_overrides: ColorOverrides::default(),
        }
    }
}

fn default_zoom_sensitivity() -> f32 {
    0.1
}
fn default_show_delay_ms() -> u64 {
    300
}
fn default_hide_delay_ms() -> u64 {
    150
}

/// Zoom clamp range (10% to 400% by default).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomExtent {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomExtent {
    fn default() -> Self {
        Self { min: 0.1, max: 4.0 }
    }
}

/// Node radius scaling: severe nodes render larger, deep nodes smaller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeSizing {
    /// Radius of a `Low` node at depth 0.
    pub base_radius: f32,
    /// Radius added per category weight step above `Low`.
    pub category_step: f32,
    /// Radius lost per level of depth.
    pub depth_falloff: f32,
    pub min_radius: f32,
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self {
            base_radius: 16.0,
            category_step: 4.0,
            depth_falloff: 2.0,
            min_radius: 8.0,
        }
    }
}

/// Optional per-category fill overrides as `#rrggbb` hex strings.
/// Malformed values fall back to the built-in palette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorOverrides {
    pub low: Option<String>,
    pub medium: Option<String>,
    pub high: Option<String>,
    pub critical: Option<String>,
}

impl ColorOverrides {
    pub fn for_category(&self, category: SeverityCategory) -> Option<&str> {
        match category {
            SeverityCategory::Low => self.low.as_deref(),
            SeverityCategory::Medium => self.medium.as_deref(),
            SeverityCategory::High => self.high.as_deref(),
            SeverityCategory::Critical => self.critical.as_deref(),
        }
    }
}
