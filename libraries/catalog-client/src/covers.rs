//! Cover upload operations.

use crate::client::{parse_json, send_error, status_error};
use crate::error::{ClientError, Result};
use catalog_core::UploadResponse;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info};

/// Multipart field the server expects the cover in.
const COVER_FIELD: &str = "cover";

/// Cover client for the catalog server.
pub struct CoverClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CoverClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Upload an image file from disk.
    ///
    /// Returns the stored filename to reference from an album's `cover`.
    pub async fn upload(&self, file_path: &Path) -> Result<UploadResponse> {
        if !file_path.is_file() {
            return Err(ClientError::FileNotFound(file_path.display().to_string()));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("cover")
            .to_string();

        let contents = tokio::fs::read(file_path).await?;
        self.upload_bytes(&file_name, contents).await
    }

    /// Upload in-memory image data under the given original filename.
    pub async fn upload_bytes(&self, file_name: &str, contents: Vec<u8>) -> Result<UploadResponse> {
        let size = contents.len();
        debug!(file = %file_name, size, "Uploading cover");

        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(mime_type_for_file(Path::new(file_name)))?;
        let form = Form::new().part(COVER_FIELD, part);

        let url = format!("{}/upload-cover", self.base_url);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let upload: UploadResponse = parse_json(response, "upload response").await?;
        info!(filename = %upload.filename, size, "Cover uploaded");
        Ok(upload)
    }

    /// Delete a previously uploaded cover.
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let url = format!(
            "{}/covers/{}",
            self.base_url,
            urlencoding::encode(filename)
        );
        debug!(url = %url, "Deleting cover");

        let response = self.http.delete(&url).send().await.map_err(send_error)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        info!(filename = %filename, "Cover deleted");
        Ok(())
    }
}

/// Get MIME type for an image file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_for_file(Path::new("cover.jpg")), "image/jpeg");
        assert_eq!(mime_type_for_file(Path::new("cover.JPEG")), "image/jpeg");
        assert_eq!(mime_type_for_file(Path::new("cover.png")), "image/png");
        assert_eq!(mime_type_for_file(Path::new("cover.webp")), "image/webp");
        assert_eq!(
            mime_type_for_file(Path::new("cover.unknown")),
            "application/octet-stream"
        );
    }
}
