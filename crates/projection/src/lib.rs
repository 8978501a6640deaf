//! Coordinate transforms from source CRSs into WGS84 (CRS84).

pub mod crs;
pub mod transverse_mercator;

pub use crs::SourceCrs;
pub use transverse_mercator::TransverseMercator;

use atlas_common::AtlasResult;

/// Transforms source coordinates into WGS84 lon/lat.
///
/// Positions pass through `to_wgs84` exactly once, at load time.
#[derive(Debug, Clone)]
pub enum Projector {
    /// Source is already CRS84.
    Identity,
    /// Projected source; inverse transverse Mercator applies.
    Projected(TransverseMercator),
}

impl Projector {
    /// Build a projector for a declared CRS name. An absent declaration is
    /// the GeoJSON default, CRS84.
    pub fn for_crs_name(name: Option<&str>) -> AtlasResult<Self> {
        let crs = match name {
            Some(name) => SourceCrs::from_crs_name(name)?,
            None => SourceCrs::Crs84,
        };
        Ok(Self::for_crs(crs))
    }

    pub fn for_crs(crs: SourceCrs) -> Self {
        match crs {
            SourceCrs::Crs84 => Projector::Identity,
            SourceCrs::Epsg25832 => Projector::Projected(TransverseMercator::epsg_25832()),
            SourceCrs::Epsg5652 => Projector::Projected(TransverseMercator::epsg_5652()),
        }
    }

    /// Transform one position. Input and output are `(x, y)` in GeoJSON
    /// axis order, i.e. lon/lat for geographic coordinates.
    pub fn to_wgs84(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projector::Identity => (x, y),
            Projector::Projected(tm) => {
                let (lat, lon) = tm.projected_to_geo(x, y);
                (lon, lat)
            }
        }
    }
}
