mod album;
mod filter;
mod responses;

pub use album::{Album, AlbumId, AlbumView, CreateAlbum, UpdateAlbum};
pub use filter::AlbumFilter;
pub use responses::{MessageResponse, UploadResponse};
