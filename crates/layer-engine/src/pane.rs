//! Drawing-order panes.
//!
//! A pane is a named z-index bucket. The hit tester resolves stacking
//! between overlapping features by comparing pane z-indices, so the values
//! here are load-bearing, not cosmetic: protected-area polygons live in
//! their own pane *below* the overlay pane so route lines always stay
//! visible above them, and point markers sit on top of everything.

use serde::{Deserialize, Serialize};

/// Named drawing-order bucket a rendered feature is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pane {
    /// Protected-area polygons.
    Polygon,
    /// Default vector pane for lines and generic polygons.
    Overlay,
    /// Point markers.
    Marker,
}

impl Pane {
    pub fn z_index(&self) -> u32 {
        match self {
            Pane::Polygon => 300,
            Pane::Overlay => 400,
            Pane::Marker => 600,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pane::Polygon => "polygonPane",
            Pane::Overlay => "overlayPane",
            Pane::Marker => "markerPane",
        }
    }
}
