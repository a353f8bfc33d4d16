//! Album Catalog Client
//!
//! HTTP client and offline-first state for the album catalog API.
//!
//! # Features
//!
//! - **Albums**: list with band/genre filters, get, create, update, delete
//! - **Covers**: upload images, discard orphaned uploads
//! - **Offline cache**: the last fetched list mirrored into a durable
//!   key-value store, with an optional staleness limit
//! - **Session**: the list/search/create/edit/delete flows, with user
//!   prompts behind the `Dialogs` trait
//!
//! # Example
//!
//! ```ignore
//! use catalog_client::{AlbumCache, CatalogClient, CatalogSession, ClientConfig, FileStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::new("http://localhost:5000"))?;
//!     let cache = AlbumCache::new(Box::new(FileStore::open("cache.json")?));
//!
//!     let mut session = CatalogSession::new(client, cache, MyDialogs);
//!     session.activate().await?;
//!     for album in session.albums() {
//!         println!("{} - {}", album.album.band, album.album.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod albums;
mod cache;
mod client;
mod covers;
mod error;
mod session;
mod store;
mod types;

// Re-export main types
pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use types::ClientConfig;

pub use cache::{AlbumCache, CachedAlbums, ALBUMS_KEY, FETCHED_AT_KEY};
pub use session::{
    CatalogSession, CreateForm, Dialogs, ListSource, SearchFields, Status, GENERIC_FAILURE,
    MISSING_FIELDS,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};

// Re-export sub-clients for direct use if needed
pub use albums::AlbumsClient;
pub use covers::CoverClient;
