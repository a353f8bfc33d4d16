/// Cover storage service - manages uploaded cover images on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

#[derive(Debug, Clone)]
pub struct CoverStorage {
    base_path: PathBuf,
    max_bytes: u64,
}

impl CoverStorage {
    pub fn new(base_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            base_path,
            max_bytes,
        }
    }

    /// Initialize the covers directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Largest accepted cover, in bytes
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Store an uploaded cover under a generated name and return that name.
    ///
    /// Names are `<unix millis>_<original name>`; an existing file is never
    /// overwritten, the timestamp is bumped instead.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String> {
        if data.len() as u64 > self.max_bytes {
            return Err(ServerError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let safe_name = sanitize_filename(original_name);
        let mut timestamp = chrono::Utc::now().timestamp_millis();

        loop {
            let filename = format!("{}_{}", timestamp, safe_name);
            let path = self.base_path.join(&filename);

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(data).await?;
                    file.flush().await?;
                    tracing::info!(filename = %filename, size = data.len(), "Cover stored");
                    return Ok(filename);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    timestamp += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Resolve a stored filename to its path.
    ///
    /// Rejects anything that is not a single plain path component.
    pub fn path_for(&self, filename: &str) -> Result<PathBuf> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\'])
        {
            return Err(ServerError::BadRequest("Invalid cover filename".to_string()));
        }
        Ok(self.base_path.join(filename))
    }

    /// Check whether a cover with this filename exists
    pub async fn exists(&self, filename: &str) -> bool {
        match self.path_for(filename) {
            Ok(path) => fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Delete a stored cover
    pub async fn delete(&self, filename: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(filename = %filename, "Cover deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ServerError::NotFound("Cover not found.".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Reduce an uploaded filename to its last path component and replace every
/// run of whitespace with a single underscore.
pub fn sanitize_filename(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut sanitized = String::with_capacity(base.len());
    let mut in_whitespace = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
        } else {
            sanitized.push(c);
            in_whitespace = false;
        }
    }

    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        "cover".to_string()
    } else {
        sanitized
    }
}
