//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the catalog server or the local cache.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error during upload or cache access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local cache could not be read or written
    #[error("Cache error: {0}")]
    Cache(String),

    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// Whether this is a 404 from the server
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::ServerError { status: 404, .. })
    }

    /// Whether this error came from a remote call rather than local input
    pub fn is_transport(&self) -> bool {
        !matches!(
            self,
            ClientError::Validation(_)
                | ClientError::Cache(_)
                | ClientError::FileNotFound(_)
                | ClientError::Io(_)
        )
    }
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
