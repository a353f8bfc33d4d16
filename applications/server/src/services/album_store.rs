/// In-memory album collection
use catalog_core::{Album, AlbumFilter, AlbumId, CatalogError, CreateAlbum, Result, UpdateAlbum};
use tokio::sync::RwLock;

/// Owns the album collection and the id counter.
///
/// Ids come from a counter that only moves forward, so an id freed by a
/// delete is never handed out again.
#[derive(Debug)]
pub struct AlbumStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    albums: Vec<Album>,
    next_id: AlbumId,
}

impl AlbumStore {
    /// Empty store; the first album gets id 1
    pub fn new() -> Self {
        Self::with_albums(Vec::new())
    }

    /// Store pre-populated with `albums`, in that order
    pub fn with_albums(albums: Vec<Album>) -> Self {
        let next_id = albums.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner { albums, next_id }),
        }
    }

    /// Store holding the demo albums
    pub fn seeded() -> Self {
        Self::with_albums(seed_albums())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.albums.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Albums matching `filter`, in collection order
    pub async fn list(&self, filter: &AlbumFilter) -> Vec<Album> {
        let inner = self.inner.read().await;
        inner
            .albums
            .iter()
            .filter(|album| filter.matches(album))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: AlbumId) -> Result<Album> {
        let inner = self.inner.read().await;
        inner
            .albums
            .iter()
            .find(|album| album.id == id)
            .cloned()
            .ok_or(CatalogError::AlbumNotFound(id))
    }

    /// Validate and append a new album, allocating its id
    pub async fn create(&self, request: CreateAlbum) -> Result<Album> {
        let mut inner = self.inner.write().await;
        let album = request.into_album(inner.next_id)?;
        inner.next_id += 1;
        inner.albums.push(album.clone());
        tracing::info!(id = album.id, band = %album.band, title = %album.title, "Album created");
        Ok(album)
    }

    /// Apply a partial update in place
    pub async fn update(&self, id: AlbumId, update: UpdateAlbum) -> Result<Album> {
        let mut inner = self.inner.write().await;
        let album = inner
            .albums
            .iter_mut()
            .find(|album| album.id == id)
            .ok_or(CatalogError::AlbumNotFound(id))?;
        update.apply_to(album);
        tracing::info!(id, "Album updated");
        Ok(album.clone())
    }

    /// Remove an album, returning it
    pub async fn delete(&self, id: AlbumId) -> Result<Album> {
        let mut inner = self.inner.write().await;
        let index = inner
            .albums
            .iter()
            .position(|album| album.id == id)
            .ok_or(CatalogError::AlbumNotFound(id))?;
        let album = inner.albums.remove(index);
        tracing::info!(id, "Album deleted");
        Ok(album)
    }
}

impl Default for AlbumStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The three albums the catalog starts with
pub fn seed_albums() -> Vec<Album> {
    let album = |id, band: &str, title: &str, year, genre: &str| Album {
        id,
        band: band.to_string(),
        title: title.to_string(),
        year,
        genre: genre.to_string(),
        cover: None,
    };

    vec![
        album(1, "Metallica", "Master of Puppets", 1986, "Thrash Metal"),
        album(2, "Metallica", "Ride the Lightning", 1984, "Thrash Metal"),
        album(3, "AC/DC", "Back in Black", 1980, "Hard Rock"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_album(band: &str, title: &str) -> CreateAlbum {
        CreateAlbum {
            band: Some(band.to_string()),
            title: Some(title.to_string()),
            year: Some(1991),
            genre: Some("Heavy Metal".to_string()),
            cover: None,
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = AlbumStore::seeded();
        assert_eq!(store.len().await, 3);

        let all = store.list(&AlbumFilter::default()).await;
        let ids: Vec<_> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let store = AlbumStore::seeded();
        let album = store
            .create(new_album("Metallica", "Metallica"))
            .await
            .unwrap();
        assert_eq!(album.id, 4);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = AlbumStore::seeded();
        let first = store.create(new_album("A", "One")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(new_album("B", "Two")).await.unwrap();
        assert_eq!(first.id, 4);
        assert_eq!(second.id, 5);

        // Deleting from the middle must not cause a collision either
        store.delete(2).await.unwrap();
        let third = store.create(new_album("C", "Three")).await.unwrap();
        assert_eq!(third.id, 6);
        let ids: Vec<_> = store
            .list(&AlbumFilter::default())
            .await
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 5, 6]);
    }

    #[tokio::test]
    async fn test_invalid_create_does_not_consume_id() {
        let store = AlbumStore::seeded();
        let mut incomplete = new_album("A", "One");
        incomplete.genre = None;

        assert_eq!(
            store.create(incomplete).await,
            Err(CatalogError::MissingFields)
        );
        assert_eq!(store.len().await, 3);

        let album = store.create(new_album("A", "One")).await.unwrap();
        assert_eq!(album.id, 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let store = AlbumStore::seeded();
        assert_eq!(
            store.update(42, UpdateAlbum::title("x")).await,
            Err(CatalogError::AlbumNotFound(42))
        );
        assert_eq!(store.delete(42).await, Err(CatalogError::AlbumNotFound(42)));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one() {
        let store = AlbumStore::new();
        assert!(store.is_empty().await);
        let album = store.create(new_album("A", "B")).await.unwrap();
        assert_eq!(album.id, 1);
    }
}
