//! Album Catalog Server Library
//!
//! In-memory album catalog with cover uploads and static cover serving.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{album_store::AlbumStore, cover_storage::CoverStorage};
pub use state::AppState;
