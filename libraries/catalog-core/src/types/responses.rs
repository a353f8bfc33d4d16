//! Non-album response bodies

use serde::{Deserialize, Serialize};

/// Plain `{ "message": ... }` body, used for confirmations and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response from a successful cover upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Stored filename, to be referenced from an album's `cover`
    pub filename: String,
    pub cover_url: String,
}
