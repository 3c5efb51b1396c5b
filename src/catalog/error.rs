//! Error types for the catalog API client

use thiserror::Error;

/// Errors that can occur when fetching the course catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("Catalog API error ({status}) for {url}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Response body was not a valid course payload
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether retrying the request could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            CatalogError::RequestError(_) => true,
            CatalogError::ApiError { status, .. } => *status >= 500,
            CatalogError::JsonError(_) => false,
        }
    }
}
