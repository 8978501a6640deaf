//! Wire types for the file-serving backend.
//!
//! Two endpoints feed the layer builder:
//! - `GET /fileList?directory=` — recursive name/mime/path listing,
//! - `GET /fileListAndData?directory=` — non-recursive listing with file
//!   content inlined (JSON pre-parsed, images base64-encoded).
//!
//! Both respond with `{"files": [...]}` on success and `{"error": "..."}`
//! with status 500 otherwise. The same structs serve the axum handlers and
//! the reqwest client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the recursive `/fileList` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Path relative to the served data root, usable as a fetch URL.
    pub path: String,
}

/// Response envelope of `/fileList`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One entry of the `/fileListAndData` listing, content included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayload {
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Parsed JSON document for `application/json` entries, a base64
    /// string for `image/*`, raw text otherwise.
    pub data: Value,
}

impl FilePayload {
    pub fn is_json(&self) -> bool {
        self.mime_type == "application/json"
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// File name without its final extension.
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(index) => &self.name[..index],
            None => &self.name,
        }
    }
}

/// Response envelope of `/fileListAndData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayloadResponse {
    #[serde(default)]
    pub files: Vec<FilePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
