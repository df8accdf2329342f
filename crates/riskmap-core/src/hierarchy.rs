use crate::error::HierarchyError;
use crate::severity::SeverityCategory;
use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Severity as delivered by the datastore: either a raw number or a
/// symbolic category name.
///
/// Symbols outside the four known names are kept verbatim so callers can
/// log them; they classify as `Low` (recoverable fallback, not an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeverityValue {
    Raw(f64),
    Named(SeverityCategory),
    Other(String),
}

impl SeverityValue {
    /// Resolve to a category. Raw numbers go through the fixed thresholds,
    /// known names are accepted as-is, anything else falls back to `Low`.
    pub fn classify(&self) -> SeverityCategory {
        match self {
            SeverityValue::Raw(value) => SeverityCategory::from_raw(*value),
            SeverityValue::Named(category) => *category,
            SeverityValue::Other(symbol) => {
                symbol.parse().unwrap_or(SeverityCategory::Low)
            }
        }
    }

    /// The raw numeric severity, if this value carries one.
    pub fn raw(&self) -> Option<f64> {
        match self {
            SeverityValue::Raw(value) => Some(*value),
            _ => None,
        }
    }

    /// True when the value is a symbol outside the known category names.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, SeverityValue::Other(symbol) if symbol.parse::<SeverityCategory>().is_err())
    }
}

impl Default for SeverityValue {
    fn default() -> Self {
        SeverityValue::Raw(0.0)
    }
}

/// A node of the domain hierarchy as fetched from the datastore.
///
/// Ownership of `children` makes the tree invariant structural: no shared
/// or cyclic references are expressible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskNode {
    pub id: NodeId,
    pub name: String,
    /// 1-based hierarchy level as reported by the datastore.
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub severity: SeverityValue,
    #[serde(default)]
    pub total_quantity: i64,
    /// Initial expansion hint; new nodes are visible by default.
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    #[serde(default)]
    pub children: Vec<RiskNode>,
}

fn default_level() -> u32 {
    1
}
fn default_expanded() -> bool {
    true
}

impl RiskNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level: default_level(),
            severity: SeverityValue::default(),
            total_quantity: 0,
            expanded: default_expanded(),
            children: Vec::new(),
        }
    }
}

/// Decode a hierarchy payload from its JSON wire form.
pub fn risk_nodes_from_json(payload: &str) -> Result<Vec<RiskNode>, HierarchyError> {
    Ok(serde_json::from_str(payload)?)
}

/// Decode a hierarchy payload from an already-parsed JSON value.
pub fn risk_nodes_from_value(value: serde_json::Value) -> Result<Vec<RiskNode>, HierarchyError> {
    Ok(serde_json::from_value(value)?)
}
