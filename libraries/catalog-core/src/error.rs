/// Core error types for the album catalog
use crate::types::AlbumId;
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Core error type for the album catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// One of band/title/year/genre was absent on create
    #[error("Missing required fields (band, title, year, genre).")]
    MissingFields,

    /// Album not found
    #[error("Album not found: {0}")]
    AlbumNotFound(AlbumId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
