use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or parsing a GeoJSON feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status
    #[error("Feed {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Local feed file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Body is not a GeoJSON document we understand
    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A feature lacks the fields an earthquake needs
    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    /// Configuration error (bad URL, timeout, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using FeedError
pub type Result<T> = std::result::Result<T, FeedError>;
