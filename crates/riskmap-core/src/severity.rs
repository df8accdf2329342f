use crate::error::CategoryParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw severity at or above this value classifies as [`SeverityCategory::Critical`].
pub const CRITICAL_THRESHOLD: f64 = 20.0;
/// Raw severity in `[HIGH_THRESHOLD, CRITICAL_THRESHOLD)` classifies as `High`.
pub const HIGH_THRESHOLD: f64 = 10.0;
/// Raw severity in `[MEDIUM_THRESHOLD, HIGH_THRESHOLD)` classifies as `Medium`.
pub const MEDIUM_THRESHOLD: f64 = 5.0;

/// Ordered risk classification of a hierarchy node.
///
/// The ordering is meaningful: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityCategory {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityCategory {
    pub const ALL: [SeverityCategory; 4] = [
        SeverityCategory::Low,
        SeverityCategory::Medium,
        SeverityCategory::High,
        SeverityCategory::Critical,
    ];

    /// Classify a raw severity number against the fixed thresholds.
    pub fn from_raw(severity: f64) -> Self {
        if severity >= CRITICAL_THRESHOLD {
            SeverityCategory::Critical
        } else if severity >= HIGH_THRESHOLD {
            SeverityCategory::High
        } else if severity >= MEDIUM_THRESHOLD {
            SeverityCategory::Medium
        } else {
            SeverityCategory::Low
        }
    }

    /// Numeric weight (1-4) used for averaging and visual scaling.
    pub fn weight(self) -> u8 {
        match self {
            SeverityCategory::Low => 1,
            SeverityCategory::Medium => 2,
            SeverityCategory::High => 3,
            SeverityCategory::Critical => 4,
        }
    }

    /// Map an averaged weight back into a category.
    ///
    /// Used for nodes that have no raw severity of their own (the synthetic
    /// root): midpoint rounding over the 1-4 weight scale.
    pub fn from_weight(weight: f64) -> Self {
        if weight < 1.5 {
            SeverityCategory::Low
        } else if weight < 2.5 {
            SeverityCategory::Medium
        } else if weight < 3.5 {
            SeverityCategory::High
        } else {
            SeverityCategory::Critical
        }
    }

    /// Zero-based index, usable for per-category arrays.
    pub fn index(self) -> usize {
        self.weight() as usize - 1
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityCategory::Low => "low",
            SeverityCategory::Medium => "medium",
            SeverityCategory::High => "high",
            SeverityCategory::Critical => "critical",
        }
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SeverityCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SeverityCategory::Low),
            "medium" => Ok(SeverityCategory::Medium),
            "high" => Ok(SeverityCategory::High),
            "critical" => Ok(SeverityCategory::Critical),
            _ => Err(CategoryParseError::UnknownCategory(s.to_string())),
        }
    }
}
