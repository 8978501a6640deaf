//! Click hit testing over stacked vector features.
//!
//! A map click rarely lands on exactly one feature: route variants, the
//! infrastructure inventory and protected areas overlap along the same
//! corridor. Resolution works in three steps: keep the two nearest
//! stroked features within a 10 m tolerance (a fixed two-slot insertion —
//! only the two nearest ever matter), re-sort those survivors by pane
//! stacking order, then walk from the top looking for a feature that both
//! has a click handler and is flagged always-clickable. Everything else is
//! treated as occluded, even when drawn on top.

use atlas_common::FeatureId;

use crate::layer::RenderedFeature;
use crate::style::Symbol;

/// Tolerance around the click point, in meters.
pub const CLICK_PADDING_METERS: f64 = 10.0;

/// Mean earth radius in meters, matching the projection math.
const EARTH_RADIUS: f64 = 6371229.0;

/// Outcome of a click resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitDecision {
    /// Deliver the click to this feature.
    Feature(FeatureId),
    /// No candidate qualified; surface "no information available".
    NoInformation,
}

/// A surviving candidate within the click tolerance.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub feature_id: FeatureId,
    pub distance_m: f64,
    pub pane_z: u32,
    pub always_clickable: bool,
    pub has_click_handler: bool,
}

/// Keeps the two nearest candidates, ordered (closest, second-closest).
///
/// Deliberately not a general sort: candidates insert into a fixed pair so
/// the "only two matter" intent is visible in the structure.
#[derive(Debug, Default)]
pub struct ClosestPair {
    slots: Vec<Candidate>,
}

impl ClosestPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consider(&mut self, candidate: Candidate) {
        match self.slots.len() {
            0 => self.slots.push(candidate),
            1 => {
                if candidate.distance_m < self.slots[0].distance_m {
                    self.slots.insert(0, candidate);
                } else {
                    self.slots.push(candidate);
                }
            }
            _ => {
                if candidate.distance_m < self.slots[0].distance_m {
                    self.slots[1] = self.slots[0].clone();
                    self.slots[0] = candidate;
                } else if candidate.distance_m < self.slots[1].distance_m {
                    self.slots[1] = candidate;
                }
            }
        }
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.slots
    }
}

/// Resolve a click at `(lon, lat)` over the currently rendered features.
///
/// Only stroked symbols (lines, polygon outlines) participate; markers
/// handle their own clicks through their larger hit targets.
pub fn resolve_click<'a>(
    features: impl Iterator<Item = &'a RenderedFeature>,
    lon: f64,
    lat: f64,
) -> HitDecision {
    let mut pair = ClosestPair::new();

    for rendered in features {
        if !matches!(rendered.symbol, Symbol::Line(_) | Symbol::Polygon(_)) {
            continue;
        }
        let Some(geometry) = rendered.feature.geometry.as_ref() else {
            continue;
        };

        let distance = geometry
            .vector_paths()
            .iter()
            .filter(|path| path.len() >= 2)
            .map(|path| point_to_path_distance_m((lon, lat), path))
            .fold(f64::INFINITY, f64::min);

        if distance <= CLICK_PADDING_METERS {
            pair.consider(Candidate {
                feature_id: rendered.id,
                distance_m: distance,
                pane_z: rendered.pane.z_index(),
                always_clickable: rendered.always_clickable,
                has_click_handler: rendered.has_click_handler,
            });
        }
    }

    let mut survivors = pair.into_candidates();
    survivors.sort_by_key(|c| c.pane_z);

    // Topmost first.
    for candidate in survivors.iter().rev() {
        if candidate.has_click_handler && candidate.always_clickable {
            return HitDecision::Feature(candidate.feature_id);
        }
    }
    HitDecision::NoInformation
}

/// Minimum distance in meters from a point to a path, using a local
/// equirectangular frame centered on the point. Exact enough at the 10 m
/// scale this operates on.
pub fn point_to_path_distance_m(point: (f64, f64), path: &[(f64, f64)]) -> f64 {
    let (lon0, lat0) = point;
    let to_rad = std::f64::consts::PI / 180.0;
    let cos_lat = (lat0 * to_rad).cos();

    let to_local = |(lon, lat): (f64, f64)| -> (f64, f64) {
        (
            (lon - lon0) * to_rad * cos_lat * EARTH_RADIUS,
            (lat - lat0) * to_rad * EARTH_RADIUS,
        )
    };

    let mut minimum = f64::INFINITY;
    for segment in path.windows(2) {
        let a = to_local(segment[0]);
        let b = to_local(segment[1]);
        minimum = minimum.min(point_to_segment_distance((0.0, 0.0), a, b));
    }
    minimum
}

fn point_to_segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (ax, ay) = a;
    let (bx, by) = b;
    let (px, py) = p;

    let dx = bx - ax;
    let dy = by - ay;
    let length_sq = dx * dx + dy * dy;

    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / length_sq).clamp(0.0, 1.0)
    };

    let cx = ax + t * dx;
    let cy = ay + t * dy;
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}
