//! Album Catalog Core
//!
//! Shared resource model for the album catalog service and its clients.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `CreateAlbum`, `UpdateAlbum`, `AlbumFilter`
//! - **Wire Types**: `AlbumView` (album plus derived `coverUrl`), upload and
//!   message bodies
//! - **Cover URLs**: the single derivation used by both server and client
//! - **Error Handling**: `CatalogError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use catalog_core::{Album, cover_url};
//!
//! let album = Album {
//!     id: 1,
//!     band: "Metallica".into(),
//!     title: "Master of Puppets".into(),
//!     year: 1986,
//!     genre: "Thrash Metal".into(),
//!     cover: Some("1700000000000_master.jpg".into()),
//! };
//!
//! let view = album.with_cover_url("http://localhost:5000");
//! assert_eq!(
//!     view.cover_url.as_deref(),
//!     Some("http://localhost:5000/covers/1700000000000_master.jpg")
//! );
//! assert_eq!(cover_url("http://localhost:5000", None), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cover;
pub mod error;
pub mod types;

pub use cover::{cover_url, COVERS_PATH};
pub use error::{CatalogError, Result};
pub use types::{
    Album, AlbumFilter, AlbumId, AlbumView, CreateAlbum, MessageResponse, UpdateAlbum,
    UploadResponse,
};
