//! Cover URL derivation.
//!
//! A cover is stored on an album as a bare filename. Its public URL is never
//! stored; it is derived from whatever origin the album is being served from.

/// Path prefix under which uploaded covers are served.
pub const COVERS_PATH: &str = "/covers";

/// Build the public URL of a cover file.
///
/// Returns `None` when there is no cover (or it is an empty string). The
/// filename is percent-encoded as a single path segment.
pub fn cover_url(origin: &str, cover: Option<&str>) -> Option<String> {
    let filename = cover.filter(|c| !c.is_empty())?;
    Some(format!(
        "{}{}/{}",
        origin.trim_end_matches('/'),
        COVERS_PATH,
        urlencoding::encode(filename)
    ))
}
