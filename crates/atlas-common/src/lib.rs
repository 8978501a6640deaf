//! Common types shared across all route-atlas crates.

pub mod color;
pub mod config;
pub mod error;
pub mod geojson;
pub mod protocol;

pub use color::Color;
pub use config::{LayerSettings, ProjectConfig};
pub use error::{AtlasError, AtlasResult};
pub use geojson::{Feature, FeatureCollection, Geometry, GeometryKind};
pub use protocol::{FileEntry, FileListResponse, FilePayload, FilePayloadResponse};

/// Stable identifier of a rendered feature within one map session.
///
/// Ids are handed out by the layer builder and never reused; the legend and
/// the render-membership set refer to features exclusively through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct FeatureId(pub u64);

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "feature#{}", self.0)
    }
}
