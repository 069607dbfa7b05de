//! Error types for the layout pipeline.

use thiserror::Error;

/// Failure while turning room data into a layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Upstream data is not shaped like a room list: a numeric field is
    /// missing or non-numeric, or no JSON array could be found.
    #[error("malformed room specification: {0}")]
    MalformedSpec(String),
    /// Nothing to pack: zero rooms or zero total area.
    #[error("nothing to pack (no rooms or zero total area)")]
    PackingDegenerate,
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::MalformedSpec(err.to_string())
    }
}
