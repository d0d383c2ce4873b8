//! Error types for catalog access.

use thiserror::Error;

/// Errors that can occur while talking to the remote catalog.
///
/// None of these are fatal to the selection core: the page fetcher turns
/// every one of them into an empty page and a log line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// The catalog answered with a non-success status.
    #[error("catalog API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// Catalog API rate limit exceeded.
    #[error("catalog API rate limit exceeded, retry after {retry_after} seconds")]
    RateLimited {
        /// Seconds until the limit resets.
        retry_after: u64,
    },

    /// Failed to parse JSON response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Page number or page size outside the accepted range.
    #[error("invalid page request: page {page}, size {size}")]
    InvalidRequest {
        /// One-based page number that was requested.
        page: usize,
        /// Requested page size.
        size: usize,
    },

    /// I/O error while reading or writing settings.
    #[error("I/O error: {0}")]
    Io(String),

    /// Settings file could not be parsed.
    #[error("settings parse error: {0}")]
    Settings(String),
}

impl CatalogError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => {
                "Could not reach the artwork catalog. Please check your internet connection."
            }
            Self::Status { .. } => "The artwork catalog returned an error.",
            Self::RateLimited { .. } => "Catalog rate limit reached. Please try again later.",
            Self::InvalidRequest { .. } => "That page does not exist.",
            Self::Settings(_) => "The settings file could not be read.",
            Self::JsonParse(_) => "The artwork catalog sent a response that could not be read.",
            Self::Io(_) => "An unexpected error occurred.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } | Self::Io(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::JsonParse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Settings(err.to_string())
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
