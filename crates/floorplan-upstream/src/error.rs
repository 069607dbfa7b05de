//! Upstream and generation errors.

use floorplan_logic::LayoutError;
use thiserror::Error;

/// Failure talking to the room specification service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("no API key configured (set ANTHROPIC_API_KEY)")]
    MissingApiKey,
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream rejected credentials (HTTP {0})")]
    Auth(u16),
    #[error("upstream returned HTTP {0}: {1}")]
    Status(u16, String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected upstream response: {0}")]
    BadResponse(String),
}

impl UpstreamError {
    /// Worth another attempt: timeouts, transport errors, server-side 5xx
    /// and rate limiting.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Timeout | UpstreamError::Http(_) => true,
            UpstreamError::Status(code, _) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

/// Anything that can stop a generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
