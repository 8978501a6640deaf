//! GeoJSON data model for layer sources.
//!
//! The viewer consumes plain GeoJSON FeatureCollections as exported from
//! QGIS, including the legacy `crs` member that declares the source
//! coordinate system. Geometries are modelled as a tagged enum; feature
//! properties keep their source order so popup rows read like the source
//! attribute table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON FeatureCollection, plus the non-standard members QGIS writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Collection name as exported (usually the source layer name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared coordinate reference system, if any. Absent means the
    /// GeoJSON default (CRS84).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<CrsMember>,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// The declared CRS name, e.g. `"urn:ogc:def:crs:EPSG::25832"`.
    pub fn crs_name(&self) -> Option<&str> {
        self.crs.as_ref().map(|c| c.properties.name.as_str())
    }

    /// Apply a coordinate transform to every position in the collection.
    ///
    /// Used once at load time to bring projected sources into WGS84;
    /// features are treated as immutable afterwards.
    pub fn project_in_place(&mut self, transform: &dyn Fn(f64, f64) -> (f64, f64)) {
        for feature in &mut self.features {
            if let Some(geometry) = &mut feature.geometry {
                geometry.project_in_place(transform);
            }
        }
    }
}

/// The legacy `crs` member: `{"type": "name", "properties": {"name": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrsMember {
    #[serde(rename = "type")]
    pub type_: String,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrsProperties {
    pub name: String,
}

/// One geometry + attribute record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Null geometries occur in exports; such features carry data only.
    pub geometry: Option<Geometry>,

    /// Attribute map in source order.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// The feature's `name` attribute as text, used for hover tooltips.
    pub fn name(&self) -> Option<&str> {
        match self.properties.get("name") {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        self.geometry.as_ref().map(|g| g.kind())
    }
}

/// Coordinate position: `[lon, lat]` with an optional elevation we carry
/// through untouched.
pub type Position = Vec<f64>;

/// GeoJSON geometry, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

/// Coarse geometry classification used for styling and legend symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } | Geometry::MultiPoint { .. } => GeometryKind::Point,
            Geometry::LineString { .. } | Geometry::MultiLineString { .. } => GeometryKind::Line,
            Geometry::Polygon { .. } | Geometry::MultiPolygon { .. } => GeometryKind::Polygon,
        }
    }

    /// First position of a point geometry as `(lon, lat)`.
    pub fn point_position(&self) -> Option<(f64, f64)> {
        match self {
            Geometry::Point { coordinates } => position_lon_lat(coordinates),
            Geometry::MultiPoint { coordinates } => {
                coordinates.first().and_then(|p| position_lon_lat(p))
            }
            _ => None,
        }
    }

    /// All line paths as `(lon, lat)` sequences. MultiLineStrings yield one
    /// path per part; non-line geometries yield nothing.
    pub fn line_paths(&self) -> Vec<Vec<(f64, f64)>> {
        match self {
            Geometry::LineString { coordinates } => vec![path_lon_lat(coordinates)],
            Geometry::MultiLineString { coordinates } => {
                coordinates.iter().map(|part| path_lon_lat(part)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// All stroked paths: line parts for line geometries, rings for
    /// polygons. Used for distance-to-geometry hit testing.
    pub fn vector_paths(&self) -> Vec<Vec<(f64, f64)>> {
        match self {
            Geometry::LineString { .. } | Geometry::MultiLineString { .. } => self.line_paths(),
            Geometry::Polygon { coordinates } => {
                coordinates.iter().map(|ring| path_lon_lat(ring)).collect()
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|polygon| polygon.iter().map(|ring| path_lon_lat(ring)))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn project_in_place(&mut self, transform: &dyn Fn(f64, f64) -> (f64, f64)) {
        match self {
            Geometry::Point { coordinates } => project_position(coordinates, transform),
            Geometry::MultiPoint { coordinates } => {
                for p in coordinates {
                    project_position(p, transform);
                }
            }
            Geometry::LineString { coordinates } => {
                for p in coordinates {
                    project_position(p, transform);
                }
            }
            Geometry::MultiLineString { coordinates } => {
                for part in coordinates {
                    for p in part {
                        project_position(p, transform);
                    }
                }
            }
            Geometry::Polygon { coordinates } => {
                for ring in coordinates {
                    for p in ring {
                        project_position(p, transform);
                    }
                }
            }
            Geometry::MultiPolygon { coordinates } => {
                for polygon in coordinates {
                    for ring in polygon {
                        for p in ring {
                            project_position(p, transform);
                        }
                    }
                }
            }
        }
    }
}

fn position_lon_lat(position: &[f64]) -> Option<(f64, f64)> {
    match position {
        [x, y, ..] => Some((*x, *y)),
        _ => None,
    }
}

fn path_lon_lat(path: &[Position]) -> Vec<(f64, f64)> {
    path.iter().filter_map(|p| position_lon_lat(p)).collect()
}

fn project_position(position: &mut Position, transform: &dyn Fn(f64, f64) -> (f64, f64)) {
    if position.len() >= 2 {
        let (x, y) = transform(position[0], position[1]);
        position[0] = x;
        position[1] = y;
    }
}
