/// Server services
pub mod album_store;
pub mod cover_storage;

pub use album_store::AlbumStore;
pub use cover_storage::CoverStorage;
