//! Error types for the Betfair client.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading credentials and decoding
/// a response body.
#[derive(Debug, Error)]
pub enum BetfairError {
    #[error("Environment variable not set: {0}")]
    MissingEnv(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read certificate file {}: {source}", .path.display())]
    Certificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An enumerated parameter fell outside its allow-list.
    #[error("Invalid {field} {value:?}, expected one of {allowed:?}")]
    InvalidParameter {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Betfair login failed: {0}")]
    Login(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BetfairError>;
