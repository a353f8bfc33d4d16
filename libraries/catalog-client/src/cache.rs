//! Offline mirror of the album list.

use crate::error::{ClientError, Result};
use crate::store::KeyValueStore;
use catalog_core::AlbumView;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Key holding the JSON array of the last fetched album list.
pub const ALBUMS_KEY: &str = "albums";
/// Key holding the RFC 3339 time of the last full fetch.
pub const FETCHED_AT_KEY: &str = "albums.fetched_at";

/// Album list as read back from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAlbums {
    pub albums: Vec<AlbumView>,
    /// When the list was last replaced by a full fetch
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Cache-aside mirror of the album list in a `KeyValueStore`.
///
/// A full fetch replaces the list and stamps it; create/update/delete patch
/// the list without touching the stamp. With no `max_age` a cached list is
/// always considered fresh.
pub struct AlbumCache {
    store: Box<dyn KeyValueStore>,
    max_age: Option<Duration>,
}

impl AlbumCache {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            max_age: None,
        }
    }

    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Read the cached list. Missing or unreadable contents are a miss.
    pub fn load(&self) -> Option<CachedAlbums> {
        let raw = match self.store.get(ALBUMS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read album cache");
                return None;
            }
        };

        let albums: Vec<AlbumView> = match serde_json::from_str(&raw) {
            Ok(albums) => albums,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable album cache");
                return None;
            }
        };

        let fetched_at = self
            .store
            .get(FETCHED_AT_KEY)
            .ok()
            .flatten()
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|t| t.with_timezone(&Utc));

        Some(CachedAlbums { albums, fetched_at })
    }

    /// Whether a cached list may be shown without refetching.
    pub fn is_fresh(&self, cached: &CachedAlbums, now: DateTime<Utc>) -> bool {
        let Some(max_age) = self.max_age else {
            return true;
        };
        let Some(fetched_at) = cached.fetched_at else {
            return false;
        };
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => now.signed_duration_since(fetched_at) <= max_age,
            Err(_) => true,
        }
    }

    /// Replace the cached list with a fresh fetch result.
    pub fn store_fetched(&self, albums: &[AlbumView]) -> Result<()> {
        self.write_albums(albums)?;
        self.store.set(FETCHED_AT_KEY, &Utc::now().to_rfc3339())
    }

    /// Write a locally patched list, keeping the fetch time.
    pub fn store_patched(&self, albums: &[AlbumView]) -> Result<()> {
        self.write_albums(albums)
    }

    /// Drop the cached list.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(ALBUMS_KEY)?;
        self.store.remove(FETCHED_AT_KEY)
    }

    fn write_albums(&self, albums: &[AlbumView]) -> Result<()> {
        let raw = serde_json::to_string(albums).map_err(|e| ClientError::Cache(e.to_string()))?;
        self.store.set(ALBUMS_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use catalog_core::Album;

    fn album(id: u64) -> AlbumView {
        Album {
            id,
            band: "AC/DC".into(),
            title: "Back in Black".into(),
            year: 1980,
            genre: "Hard Rock".into(),
            cover: None,
        }
        .with_cover_url("http://localhost:5000")
    }

    #[test]
    fn test_empty_cache_is_a_miss() {
        let cache = AlbumCache::new(Box::new(MemoryStore::new()));
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_fetched_list_round_trips_with_timestamp() {
        let cache = AlbumCache::new(Box::new(MemoryStore::new()));
        cache.store_fetched(&[album(1), album(3)]).unwrap();

        let cached = cache.load().unwrap();
        assert_eq!(cached.albums, vec![album(1), album(3)]);
        assert!(cached.fetched_at.is_some());
    }

    #[test]
    fn test_albums_key_holds_plain_json_array() {
        let store = MemoryStore::new();
        store.set(ALBUMS_KEY, "garbage").unwrap();
        let cache = AlbumCache::new(Box::new(store));
        assert_eq!(cache.load(), None);

        cache.store_patched(&[album(2)]).unwrap();
        let cached = cache.load().unwrap();
        assert_eq!(cached.albums.len(), 1);
        assert_eq!(cached.fetched_at, None);
    }

    #[test]
    fn test_freshness_rules() {
        let now = Utc::now();
        let stamped = CachedAlbums {
            albums: vec![],
            fetched_at: Some(now - chrono::Duration::minutes(10)),
        };
        let unstamped = CachedAlbums {
            albums: vec![],
            fetched_at: None,
        };

        let forever = AlbumCache::new(Box::new(MemoryStore::new()));
        assert!(forever.is_fresh(&stamped, now));
        assert!(forever.is_fresh(&unstamped, now));

        let short = AlbumCache::new(Box::new(MemoryStore::new()))
            .with_max_age(Some(Duration::from_secs(60)));
        assert!(!short.is_fresh(&stamped, now));
        assert!(!short.is_fresh(&unstamped, now));

        let long = AlbumCache::new(Box::new(MemoryStore::new()))
            .with_max_age(Some(Duration::from_secs(3600)));
        assert!(long.is_fresh(&stamped, now));
    }

    #[test]
    fn test_clear() {
        let cache = AlbumCache::new(Box::new(MemoryStore::new()));
        cache.store_fetched(&[album(1)]).unwrap();
        cache.clear().unwrap();
        assert_eq!(cache.load(), None);
    }
}
