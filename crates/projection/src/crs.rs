//! Source coordinate reference systems.

use atlas_common::{AtlasError, AtlasResult};
use std::fmt;

/// The coordinate systems a GeoJSON source may declare.
///
/// Exactly three are supported. QGIS writes CRS names as URNs like
/// `urn:ogc:def:crs:EPSG::25832`, so matching is by code substring rather
/// than exact spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCrs {
    /// WGS84 lon/lat — the GeoJSON default, no transform.
    Crs84,
    /// ETRS89 / UTM zone 32N (GRS80).
    Epsg25832,
    /// ETRS89 / UTM zone 32N with zone prefix in the easting
    /// (false easting 32 500 000 m).
    Epsg5652,
}

impl SourceCrs {
    /// Classify a declared CRS name. Unknown systems are a per-file error;
    /// the caller skips the file and keeps building.
    pub fn from_crs_name(name: &str) -> AtlasResult<Self> {
        if name.contains("CRS84") {
            Ok(SourceCrs::Crs84)
        } else if name.contains("25832") {
            Ok(SourceCrs::Epsg25832)
        } else if name.contains("5652") {
            Ok(SourceCrs::Epsg5652)
        } else {
            Err(AtlasError::UnsupportedProjection(name.to_string()))
        }
    }

    /// Whether coordinates in this system need reprojection into WGS84.
    pub fn needs_transform(&self) -> bool {
        !matches!(self, SourceCrs::Crs84)
    }
}

impl fmt::Display for SourceCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceCrs::Crs84 => "CRS84",
            SourceCrs::Epsg25832 => "EPSG:25832",
            SourceCrs::Epsg5652 => "EPSG:5652",
        };
        write!(f, "{}", name)
    }
}
