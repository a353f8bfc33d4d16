//! Main catalog server client.

use crate::albums::AlbumsClient;
use crate::covers::CoverClient;
use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use catalog_core::MessageResponse;
use reqwest::{Client, Response};
use tracing::debug;

/// Client for the album catalog HTTP API.
///
/// # Example
///
/// ```ignore
/// use catalog_client::{CatalogClient, ClientConfig};
/// use catalog_core::AlbumFilter;
///
/// let client = CatalogClient::new(ClientConfig::new("http://localhost:5000"))?;
/// let albums = client.albums().list(&AlbumFilter::default()).await?;
/// println!("Found {} albums", albums.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("AlbumCatalog/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(url = %base_url, "Catalog client created");

        Ok(Self { http, base_url })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Album CRUD operations.
    pub fn albums(&self) -> AlbumsClient<'_> {
        AlbumsClient::new(&self.http, &self.base_url)
    }

    /// Cover upload operations.
    pub fn covers(&self) -> CoverClient<'_> {
        CoverClient::new(&self.http, &self.base_url)
    }
}

/// Map a send failure, separating "server not reachable" from other errors.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Turn a non-success response into a `ServerError`, using the server's
/// `{ "message": ... }` body when there is one.
pub(crate) async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageResponse>(&text)
        .map(|body| body.message)
        .unwrap_or(text);
    ClientError::ServerError { status, message }
}

/// Decode a JSON body, reporting failures as `ParseError`.
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
