/// Request extractors shared by handlers
pub mod origin;

pub use origin::RequestOrigin;
