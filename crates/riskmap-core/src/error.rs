use thiserror::Error;

/// Error type for severity category parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    #[error("unknown severity category: {0:?}")]
    UnknownCategory(String),
}

/// Errors decoding a domain hierarchy payload.
#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("malformed hierarchy payload: {0}")]
    Json(#[from] serde_json::Error),
}
