//! Error types for the documentation example generator
//!
//! Nothing here is recovered locally: every variant propagates up to `main`,
//! which prints it and exits non-zero without writing any output.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the example generator
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Registry Errors ===
    #[error("Example '{0}' is not registered. Use 'zulip-doc-examples list' to see available examples")]
    ExampleNotFound(String),

    #[error("Invalid endpoint '{endpoint}' for example '{example}': expected 'path:method'")]
    InvalidEndpoint { example: String, endpoint: String },

    // === API Errors ===
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API call '{operation}' failed with status {status}: {message} ({code})")]
    Api {
        operation: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unexpected response from '{operation}': {reason}")]
    UnexpectedResponse { operation: String, reason: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid endpoint error
    pub fn invalid_endpoint(example: &str, endpoint: &str) -> Self {
        Self::InvalidEndpoint {
            example: example.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Create an unexpected response error
    pub fn unexpected_response(operation: &str, reason: &str) -> Self {
        Self::UnexpectedResponse {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }
}
