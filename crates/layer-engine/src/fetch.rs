//! HTTP client for the file-serving backend.

use atlas_common::{AtlasError, AtlasResult, FileEntry, FilePayload, FileListResponse, FilePayloadResponse};
use reqwest::Client;
use tracing::{debug, instrument};

/// Client for the directory-listing endpoints.
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a client against a backend base URL, e.g.
    /// `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> AtlasResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AtlasError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /fileList?directory=` — recursive name/mime/path listing.
    #[instrument(skip(self))]
    pub async fn fetch_file_list(&self, directory: &str) -> AtlasResult<Vec<FileEntry>> {
        let url = format!("{}/fileList", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("directory", directory.trim())])
            .send()
            .await
            .map_err(|e| AtlasError::fetch(directory, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AtlasError::fetch(
                directory,
                format!("server responded with status {}", response.status()),
            ));
        }

        let body: FileListResponse = response
            .json()
            .await
            .map_err(|e| AtlasError::fetch(directory, e.to_string()))?;

        if let Some(error) = body.error {
            return Err(AtlasError::fetch(directory, error));
        }
        debug!(count = body.files.len(), "fetched file list");
        Ok(body.files)
    }

    /// `GET /fileListAndData?directory=` — non-recursive listing with file
    /// content inlined.
    #[instrument(skip(self))]
    pub async fn fetch_file_list_and_data(&self, directory: &str) -> AtlasResult<Vec<FilePayload>> {
        let url = format!("{}/fileListAndData", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("directory", directory.trim())])
            .send()
            .await
            .map_err(|e| AtlasError::fetch(directory, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AtlasError::fetch(
                directory,
                format!("server responded with status {}", response.status()),
            ));
        }

        let body: FilePayloadResponse = response
            .json()
            .await
            .map_err(|e| AtlasError::fetch(directory, e.to_string()))?;

        if let Some(error) = body.error {
            return Err(AtlasError::fetch(directory, error));
        }
        debug!(count = body.files.len(), "fetched file list and data");
        Ok(body.files)
    }
}
