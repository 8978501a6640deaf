//! Error types for route-atlas crates.

use thiserror::Error;

/// Result type alias using AtlasError.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Primary error type for layer loading and projection.
///
/// Failures are contained at the smallest unit that produced them: one
/// file, one projection, one fetch. The builder logs and continues, so a
/// partially populated map is the worst outcome of any of these.
#[derive(Debug, Error)]
pub enum AtlasError {
    // === Projection errors ===
    #[error("Unsupported CRS: {0}. Only CRS84/EPSG:4326, EPSG:25832 and EPSG:5652 are supported")]
    UnsupportedProjection(String),

    // === Data errors ===
    #[error("Malformed feature collection in '{file}': {message}")]
    MalformedFeatureCollection { file: String, message: String },

    #[error("Failed to fetch '{source_name}': {message}")]
    FetchFailure { source_name: String, message: String },

    // === Configuration errors ===
    #[error("Config error: {0}")]
    ConfigError(String),

    // === Infrastructure errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AtlasError {
    /// Build a fetch failure for a named source (directory path or URL).
    pub fn fetch(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        AtlasError::FetchFailure {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Build a malformed-collection error for a file.
    pub fn malformed(file: impl Into<String>, message: impl Into<String>) -> Self {
        AtlasError::MalformedFeatureCollection {
            file: file.into(),
            message: message.into(),
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for AtlasError {
    fn from(err: std::io::Error) -> Self {
        AtlasError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        AtlasError::InternalError(format!("JSON error: {}", err))
    }
}
