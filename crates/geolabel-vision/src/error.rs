//! Error types for the vision transport layer.

use thiserror::Error;

/// Errors that can occur while talking to a vision backend.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status (auth, rate limit, ...).
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request cannot be expressed for this backend.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The response envelope did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}
