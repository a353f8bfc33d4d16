/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Covers larger than this are rejected unless configured otherwise (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin used when deriving cover URLs. Falls back to the request's
    /// scheme and Host header when unset.
    #[serde(default)]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_covers_dir")]
    pub covers_dir: PathBuf,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Start with the three demo albums
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from the given file (or `config.toml` if it exists),
    /// then apply `CATALOG_` environment overrides, e.g.
    /// `CATALOG_SERVER__PORT=8080` or `CATALOG_STORAGE__COVERS_DIR=/srv/covers`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CATALOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.max_upload_bytes == 0 {
            return Err(ServerError::Config(
                "storage.max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        if let Some(public_url) = &self.server.public_url {
            let parsed = url::Url::parse(public_url)
                .map_err(|e| ServerError::Config(format!("Invalid public_url: {}", e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ServerError::Config(
                    "public_url must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Public origin with any trailing slash removed
    pub fn public_origin(&self) -> Option<String> {
        self.server
            .public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: None,
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        covers_dir: default_covers_dir(),
        max_upload_bytes: default_max_upload_bytes(),
    }
}

fn default_covers_dir() -> PathBuf {
    PathBuf::from("./public/covers")
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        seed: default_seed(),
    }
}

fn default_seed() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            catalog: default_catalog(),
        }
    }
}
