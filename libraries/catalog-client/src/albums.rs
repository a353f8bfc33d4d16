//! Album CRUD operations.

use crate::client::{parse_json, send_error, status_error};
use crate::error::Result;
use catalog_core::{AlbumFilter, AlbumId, AlbumView, CreateAlbum, MessageResponse, UpdateAlbum};
use reqwest::Client;
use tracing::{debug, info};

/// Album client for the catalog server.
///
/// Single albums keep the `coverUrl` the server sent; one that is missing is
/// derived from the stored filename against the client's base URL.
pub struct AlbumsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AlbumsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List albums, optionally filtered by band and genre.
    ///
    /// The array is returned exactly as the server sent it, so it can be
    /// mirrored into the offline cache unchanged.
    pub async fn list(&self, filter: &AlbumFilter) -> Result<Vec<AlbumView>> {
        let url = format!("{}/albums", self.base_url);
        debug!(url = %url, ?filter, "Fetching albums");

        let response = self
            .http
            .get(&url)
            .query(filter)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let albums: Vec<AlbumView> = parse_json(response, "album list").await?;
        debug!(count = albums.len(), "Fetched albums");

        Ok(albums)
    }

    /// Get a single album.
    pub async fn get(&self, id: AlbumId) -> Result<AlbumView> {
        let url = format!("{}/albums/{}", self.base_url, id);
        debug!(url = %url, "Fetching album");

        let response = self.http.get(&url).send().await.map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let album = parse_json(response, "album").await?;
        Ok(self.normalize(album))
    }

    /// Create an album. The server assigns its id.
    pub async fn create(&self, request: &CreateAlbum) -> Result<AlbumView> {
        let url = format!("{}/albums", self.base_url);
        debug!(url = %url, "Creating album");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let album: AlbumView = parse_json(response, "created album").await?;
        info!(id = album.id(), title = %album.album.title, "Album created");
        Ok(self.normalize(album))
    }

    /// Update the supplied fields of an album.
    pub async fn update(&self, id: AlbumId, update: &UpdateAlbum) -> Result<AlbumView> {
        let url = format!("{}/albums/{}", self.base_url, id);
        debug!(url = %url, "Updating album");

        let response = self
            .http
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let album = parse_json(response, "updated album").await?;
        info!(id, "Album updated");
        Ok(self.normalize(album))
    }

    /// Delete an album.
    pub async fn delete(&self, id: AlbumId) -> Result<MessageResponse> {
        let url = format!("{}/albums/{}", self.base_url, id);
        debug!(url = %url, "Deleting album");

        let response = self.http.delete(&url).send().await.map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let message = parse_json(response, "delete confirmation").await?;
        info!(id, "Album deleted");
        Ok(message)
    }

    fn normalize(&self, album: AlbumView) -> AlbumView {
        album.normalized(self.base_url)
    }
}
