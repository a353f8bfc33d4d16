/// Shared application state
use crate::services::{AlbumStore, CoverStorage};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub albums: Arc<AlbumStore>,
    pub covers: Arc<CoverStorage>,
    /// Configured origin for cover URLs, if any
    pub public_origin: Option<String>,
}

impl AppState {
    pub fn new(albums: Arc<AlbumStore>, covers: Arc<CoverStorage>) -> Self {
        Self {
            albums,
            covers,
            public_origin: None,
        }
    }

    pub fn with_public_origin(mut self, origin: Option<String>) -> Self {
        self.public_origin = origin;
        self
    }
}
