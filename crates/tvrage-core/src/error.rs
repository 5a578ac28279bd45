//! Error types for the TVRage client
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for TVRage client operations
#[derive(Error, Debug)]
pub enum TvRageError {
    /// HTTP request failed (network error or non-success status)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failed to parse a feed document
    #[error("Failed to parse feed: {0}")]
    Parse(String),

    /// Caller passed an unusable argument (e.g. an empty show id)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Name lookup yielded no matching show id
    #[error("No show found for name: {0}")]
    ShowNotFound(String),

    /// Requested country has no entries in the current-shows feed
    #[error("No current shows for country: {0}")]
    CountryNotFound(String),

    /// Rate limited by the server (HTTP 429) after all retries
    #[error("Rate limited - too many requests")]
    RateLimited,
}

/// Result type alias for TVRage client operations
pub type Result<T> = std::result::Result<T, TvRageError>;
