//! Severity Style System
//!
//! Maps severity categories to the visual encoding used by the tree
//! renderer: fill/border/text colors, node dimensions scaled by category
//! and depth, and stable identifiers for per-node gradient definitions.

use riskmap_core::{ColorOverrides, NodeId, NodeSizing, SeverityCategory};

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: ((self.r as f32) * (1.0 - factor)) as u8,
            g: ((self.g as f32) * (1.0 - factor)) as u8,
            b: ((self.b as f32) * (1.0 - factor)) as u8,
            a: self.a,
        }
    }

    pub fn lighten(&self, factor: f32) -> Self {
        Self {
            r: ((self.r as f32) + (255.0 - self.r as f32) * factor) as u8,
            g: ((self.g as f32) + (255.0 - self.g as f32) * factor) as u8,
            b: ((self.b as f32) + (255.0 - self.b as f32) * factor) as u8,
            a: self.a,
        }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Node color palette per severity category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeColors {
    pub fill: Color,
    pub border: Color,
    pub text: Color,
}

/// Node dimensions derived from category and depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDimensions {
    pub radius: f32,
    pub border_width: f32,
    pub font_size: f32,
}

/// Complete style for a tree node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub colors: NodeColors,
    pub dimensions: NodeDimensions,
}

// ============================================================================
// Color Constants
// ============================================================================

// Low (green tones)
pub const COLOR_LOW_FILL: Color = Color::rgb(110, 180, 120);
pub const COLOR_LOW_BORDER: Color = Color::rgb(85, 150, 95);

// Medium (yellow/gold tones)
pub const COLOR_MEDIUM_FILL: Color = Color::rgb(220, 190, 90);
pub const COLOR_MEDIUM_BORDER: Color = Color::rgb(190, 160, 65);

// High (orange tones)
pub const COLOR_HIGH_FILL: Color = Color::rgb(225, 135, 60);
pub const COLOR_HIGH_BORDER: Color = Color::rgb(195, 110, 40);

// Critical (red tones)
pub const COLOR_CRITICAL_FILL: Color = Color::rgb(200, 65, 60);
pub const COLOR_CRITICAL_BORDER: Color = Color::rgb(165, 45, 40);

// Text contrast
pub const COLOR_TEXT_DARK: Color = Color::rgb(30, 30, 30);
pub const COLOR_TEXT_LIGHT: Color = Color::rgb(255, 255, 255);

// Focus/Active colors
pub const COLOR_ACTIVE_BORDER: Color = Color::rgb(255, 200, 100);
pub const COLOR_HOVER_OVERLAY: Color = Color::rgba(255, 255, 255, 30);

// ============================================================================
// Style Functions
// ============================================================================

/// Interaction state of a rendered node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeState {
    /// Whether the node is currently active (selected/clicked)
    pub is_active: bool,

    /// Whether the node is currently being hovered over
    pub is_hovered: bool,
}

impl NodeState {
    pub fn new() -> Self {
        Self {
            is_active: false,
            is_hovered: false,
        }
    }

    /// Set the active state
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Set the hovered state
    pub fn with_hovered(mut self, hovered: bool) -> Self {
        self.is_hovered = hovered;
        self
    }
}

/// Get the base colors for a severity category
pub fn node_colors(category: SeverityCategory) -> NodeColors {
    let (fill, border) = match category {
        SeverityCategory::Low => (COLOR_LOW_FILL, COLOR_LOW_BORDER),
        SeverityCategory::Medium => (COLOR_MEDIUM_FILL, COLOR_MEDIUM_BORDER),
        SeverityCategory::High => (COLOR_HIGH_FILL, COLOR_HIGH_BORDER),
        SeverityCategory::Critical => (COLOR_CRITICAL_FILL, COLOR_CRITICAL_BORDER),
    };
    NodeColors {
        fill,
        border,
        text: text_color(category),
    }
}

/// Text color keeping contrast against the category fill: dark text on the
/// lighter `Low`/`Medium` fills, light text otherwise.
pub fn text_color(category: SeverityCategory) -> Color {
    match category {
        SeverityCategory::Low | SeverityCategory::Medium => COLOR_TEXT_DARK,
        SeverityCategory::High | SeverityCategory::Critical => COLOR_TEXT_LIGHT,
    }
}

/// Node dimensions scaling with both category and depth: more severe nodes
/// render larger, deeper nodes smaller, floor-clamped at `min_radius`.
pub fn node_dimensions(category: SeverityCategory, depth: u32, sizing: &NodeSizing) -> NodeDimensions {
    let weight = f32::from(category.weight());
    let radius = (sizing.base_radius + sizing.category_step * (weight - 1.0)
        - sizing.depth_falloff * depth as f32)
        .max(sizing.min_radius);
    NodeDimensions {
        radius,
        border_width: 1.0 + 0.5 * (weight - 1.0),
        font_size: (radius * 0.75).max(9.0),
    }
}

/// Get the complete style for a node based on its category, depth and state
pub fn node_style(
    category: SeverityCategory,
    depth: u32,
    state: NodeState,
    sizing: &NodeSizing,
    overrides: &ColorOverrides,
) -> NodeStyle {
    let base = node_colors(category);
    let fill = resolve_fill(category, base.fill, overrides);

    let colors = if state.is_active {
        NodeColors {
            fill,
            border: COLOR_ACTIVE_BORDER,
            text: base.text,
        }
    } else if state.is_hovered {
        NodeColors {
            fill: fill.lighten(0.1),
            border: base.border,
            text: base.text,
        }
    } else {
        NodeColors {
            fill,
            border: base.border,
            text: base.text,
        }
    };

    NodeStyle {
        colors,
        dimensions: node_dimensions(category, depth, sizing),
    }
}

fn resolve_fill(category: SeverityCategory, fallback: Color, overrides: &ColorOverrides) -> Color {
    let Some(hex) = overrides.for_category(category) else {
        return fallback;
    };
    match Color::from_hex(hex) {
        Some(color) => color,
        None => {
            tracing::warn!(category = %category, value = hex, "malformed color override, using palette");
            fallback
        }
    }
}

// ============================================================================
// Gradient Identifiers
// ============================================================================

/// Light/dark variant of a per-node gradient definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientVariant {
    Light,
    Dark,
}

impl GradientVariant {
    fn suffix(self) -> &'static str {
        match self {
            GradientVariant::Light => "light",
            GradientVariant::Dark => "dark",
        }
    }
}

/// Deterministic, collision-free identifier for a per-node gradient
/// definition. The node's own id is encoded into the result so re-renders
/// of sibling nodes never collide.
pub fn gradient_id(category: SeverityCategory, variant: GradientVariant, node_id: &NodeId) -> String {
    let mut encoded = String::with_capacity(node_id.as_str().len());
    for ch in node_id.as_str().chars() {
        // alphanumerics pass through; everything else becomes a fixed-width
        // hex escape, keeping the encoding injective
        if ch.is_ascii_alphanumeric() {
            encoded.push(ch);
        } else {
            encoded.push_str(&format!("_{:06x}", ch as u32));
        }
    }
    format!("riskmap-grad-{}-{}-{}", category.label(), variant.suffix(), encoded)
}
