//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and
//! commands. The aggregation engine itself has no error type: malformed
//! input degrades to fallbacks, so only the HTTP and output layers can
//! fail.

use thiserror::Error;

/// Errors that can occur talking to the gateway's dashboard API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Trace not found: {0}")]
    TraceNotFound(String),

    #[error("Gateway rejected the request (check dashboard auth): {0}")]
    Unauthorized(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
