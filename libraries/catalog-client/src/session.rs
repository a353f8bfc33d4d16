//! Client-side catalog state: the album list, its offline mirror, the search
//! fields and the create form.

use crate::cache::AlbumCache;
use crate::client::CatalogClient;
use crate::error::{ClientError, Result};
use catalog_core::{AlbumFilter, AlbumId, AlbumView, CreateAlbum, UpdateAlbum};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Shown for any failed remote call. The cause only goes to the log.
pub const GENERIC_FAILURE: &str = "Could not reach the album catalog. Please try again.";
/// Shown when the create form is incomplete.
pub const MISSING_FIELDS: &str = "Fill in band, title, year and genre.";

/// Blocking user interactions.
pub trait Dialogs {
    /// Ask for a new title. `None` means the user cancelled.
    fn prompt_title(&mut self, current: &str) -> Option<String>;
    /// Ask whether the album should really be deleted.
    fn confirm_delete(&mut self, album: &AlbumView) -> bool;
    /// Show a message and wait for acknowledgement.
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Error(String),
}

/// Where the list shown after activation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// A fresh cached list, no request made
    Cache,
    /// A successful fetch
    Server,
    /// The fetch failed and an outdated cached list is shown instead
    StaleCache,
}

/// Search inputs as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFields {
    pub band: String,
    pub genre: String,
}

impl SearchFields {
    pub fn filter(&self) -> AlbumFilter {
        AlbumFilter::from_inputs(&self.band, &self.genre)
    }
}

/// Pending input for a new album, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub band: String,
    pub title: String,
    pub year: String,
    pub genre: String,
    /// Cover filename typed by hand, used when no file is chosen
    pub cover: String,
    /// Image to upload first
    pub file: Option<PathBuf>,
}

impl CreateForm {
    /// Check the required fields and build the request, without the cover.
    fn validate(&self) -> Result<CreateAlbum> {
        let required = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        let (Some(band), Some(title), Some(year), Some(genre)) = (
            required(&self.band),
            required(&self.title),
            required(&self.year),
            required(&self.genre),
        ) else {
            return Err(ClientError::Validation(MISSING_FIELDS.to_string()));
        };

        let year = year
            .parse::<i32>()
            .map_err(|_| ClientError::Validation("Year must be a number.".to_string()))?;

        Ok(CreateAlbum {
            band: Some(band),
            title: Some(title),
            year: Some(year),
            genre: Some(genre),
            cover: None,
        })
    }
}

/// The catalog as seen by one user.
pub struct CatalogSession<D: Dialogs> {
    client: CatalogClient,
    cache: AlbumCache,
    dialogs: D,
    albums: Vec<AlbumView>,
    status: Status,
    pub search: SearchFields,
    pub form: CreateForm,
}

impl<D: Dialogs> CatalogSession<D> {
    pub fn new(client: CatalogClient, cache: AlbumCache, dialogs: D) -> Self {
        Self {
            client,
            cache,
            dialogs,
            albums: Vec::new(),
            status: Status::Idle,
            search: SearchFields::default(),
            form: CreateForm::default(),
        }
    }

    pub fn albums(&self) -> &[AlbumView] {
        &self.albums
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Show the cached list if it is fresh, otherwise fetch.
    ///
    /// If the fetch fails and a stale list is cached, the stale list is shown.
    pub async fn activate(&mut self) -> Result<ListSource> {
        let cached = self.cache.load();

        if let Some(cached) = &cached {
            if self.cache.is_fresh(cached, chrono::Utc::now()) {
                self.albums = self.normalized(cached.albums.clone());
                debug!(count = self.albums.len(), "Showing cached albums");
                return Ok(ListSource::Cache);
            }
        }

        match self.fetch(AlbumFilter::default()).await {
            Ok(()) => Ok(ListSource::Server),
            Err(e) => match cached {
                Some(stale) => {
                    warn!(error = %e, "Fetch failed, showing stale cached albums");
                    self.albums = self.normalized(stale.albums);
                    Ok(ListSource::StaleCache)
                }
                None => Err(e),
            },
        }
    }

    /// Fetch with the current search fields.
    pub async fn search(&mut self) -> Result<()> {
        let filter = self.search.filter();
        self.fetch(filter).await
    }

    /// Reset the search fields and fetch everything.
    pub async fn clear_search(&mut self) -> Result<()> {
        self.search = SearchFields::default();
        self.fetch(AlbumFilter::default()).await
    }

    /// Fetch the album list, replacing the shown list and the cache.
    pub async fn fetch(&mut self, filter: AlbumFilter) -> Result<()> {
        self.status = Status::Loading;

        let result = self.client.albums().list(&filter).await;
        match result {
            Ok(albums) => {
                if let Err(e) = self.cache.store_fetched(&albums) {
                    warn!(error = %e, "Failed to write album cache");
                }
                self.albums = self.normalized(albums);
                self.status = Status::Idle;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Submit the create form.
    ///
    /// A chosen file is uploaded first and its stored name becomes the cover;
    /// otherwise the typed cover name is used. If the create fails after an
    /// upload, the orphaned upload is deleted on a best-effort basis.
    pub async fn create(&mut self) -> Result<AlbumView> {
        let mut request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.dialogs.alert(&e.to_string());
                return Err(e);
            }
        };

        self.status = Status::Loading;

        let uploaded = match self.form.file.clone() {
            Some(path) => {
                let result = self.client.covers().upload(&path).await;
                match result {
                    Ok(upload) => Some(upload.filename),
                    Err(e) => return Err(self.fail(e)),
                }
            }
            None => None,
        };

        request.cover = uploaded.clone().or_else(|| {
            let typed = self.form.cover.trim();
            (!typed.is_empty()).then(|| typed.to_string())
        });

        let result = self.client.albums().create(&request).await;
        let album = match result {
            Ok(album) => album,
            Err(e) => {
                if let Some(filename) = uploaded {
                    self.discard_upload(&filename).await;
                }
                return Err(self.fail(e));
            }
        };

        self.albums.push(album.clone());
        self.patch_cache();
        self.form = CreateForm::default();
        self.status = Status::Idle;
        info!(id = album.id(), "Album added");
        Ok(album)
    }

    /// Prompt for a new title and save it.
    ///
    /// Returns `false` without a request if the album is not in the list, the
    /// prompt is cancelled, or the title is unchanged.
    pub async fn edit_title(&mut self, id: AlbumId) -> Result<bool> {
        let Some(current) = self.find(id).map(|a| a.album.title.clone()) else {
            return Ok(false);
        };

        let Some(new_title) = self.dialogs.prompt_title(&current) else {
            return Ok(false);
        };
        let new_title = new_title.trim();
        if new_title.is_empty() || new_title == current {
            return Ok(false);
        }

        self.status = Status::Loading;

        let result = self
            .client
            .albums()
            .update(id, &UpdateAlbum::title(new_title))
            .await;
        match result {
            Ok(updated) => {
                if let Some(slot) = self.albums.iter_mut().find(|a| a.id() == id) {
                    *slot = updated;
                }
                self.patch_cache();
                self.status = Status::Idle;
                Ok(true)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Confirm and delete an album.
    ///
    /// Returns `false` without a request if the album is not in the list or
    /// the user declines.
    pub async fn delete(&mut self, id: AlbumId) -> Result<bool> {
        let Some(album) = self.find(id).cloned() else {
            return Ok(false);
        };

        if !self.dialogs.confirm_delete(&album) {
            return Ok(false);
        }

        self.status = Status::Loading;

        let result = self.client.albums().delete(id).await;
        match result {
            Ok(_) => {
                self.albums.retain(|a| a.id() != id);
                self.patch_cache();
                self.status = Status::Idle;
                Ok(true)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn find(&self, id: AlbumId) -> Option<&AlbumView> {
        self.albums.iter().find(|a| a.id() == id)
    }

    fn normalized(&self, albums: Vec<AlbumView>) -> Vec<AlbumView> {
        albums
            .into_iter()
            .map(|a| a.normalized(self.client.url()))
            .collect()
    }

    fn patch_cache(&self) {
        if let Err(e) = self.cache.store_patched(&self.albums) {
            warn!(error = %e, "Failed to update album cache");
        }
    }

    async fn discard_upload(&self, filename: &str) {
        match self.client.covers().delete(filename).await {
            Ok(()) => debug!(filename = %filename, "Discarded orphaned cover"),
            Err(e) => warn!(filename = %filename, error = %e, "Failed to discard orphaned cover"),
        }
    }

    /// Log the real cause, tell the user something generic, keep prior state.
    fn fail(&mut self, e: ClientError) -> ClientError {
        warn!(error = %e, "Catalog request failed");
        self.status = Status::Error(GENERIC_FAILURE.to_string());
        self.dialogs.alert(GENERIC_FAILURE);
        e
    }
}
