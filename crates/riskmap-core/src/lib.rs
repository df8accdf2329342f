use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod input;
pub mod render;
pub mod severity;

pub use config::{ColorOverrides, EngineConfig, NodeSizing, ZoomExtent};
pub use error::{CategoryParseError, HierarchyError};
pub use hierarchy::{RiskNode, SeverityValue, risk_nodes_from_json, risk_nodes_from_value};
pub use input::{Key, PointerButton, PointerEvent, Rect, Vec2};
pub use render::RenderNode;
pub use severity::SeverityCategory;

/// Opaque identifier for a hierarchy node, as issued by the datastore.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
