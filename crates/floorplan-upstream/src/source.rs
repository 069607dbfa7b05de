//! Where room list text comes from.

use crate::error::UpstreamError;

/// Produces free text that should contain a JSON array of rooms.
pub trait RoomSource {
    fn fetch(&self, requirements: &str) -> Result<String, UpstreamError>;
}

/// Returns the same text for every request. Used for offline runs and tests.
#[derive(Debug, Clone)]
pub struct FixedSource {
    text: String,
}

impl FixedSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl RoomSource for FixedSource {
    fn fetch(&self, _requirements: &str) -> Result<String, UpstreamError> {
        Ok(self.text.clone())
    }
}
