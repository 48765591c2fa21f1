// src/error.rs
// =============================================================================
// Errors the scanning engine can return.
//
// Setup is where things fail: bad configuration, or an HTTP client that
// cannot be built. Per-request failures are outcomes (see probe::Outcome),
// and cancellation is a normal way for a scan to end.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The session or target was rejected before any request was sent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP client for a pass could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ScanError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        ScanError::Configuration(message.into())
    }
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
