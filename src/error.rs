//! Error types for locmatch

use thiserror::Error;

/// Main error type for locmatch operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("No API credential configured (set api_keys.google or GOOGLE_API_KEY)")]
    MissingCredential,

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed upstream response: {0}")]
    UpstreamShape(String),

    #[error("Comparison error: {0}")]
    Comparison(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for locmatch operations
pub type Result<T> = std::result::Result<T, Error>;
