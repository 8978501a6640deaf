//! Style variants: one closed enumeration, one dispatch table.
//!
//! Each data file is governed by exactly one variant. A variant is a pure
//! mapping from feature attributes to a style descriptor (vector
//! geometries) and optionally to a marker spec (points). Files matching no
//! variant fall back to generic styling.

use atlas_common::geojson::{Feature, GeometryKind};
use atlas_common::Color;

use crate::pane::Pane;
use crate::style::{
    prop_display, prop_f64, prop_is, IconSymbol, MarkerSpec, StyleDescriptor, Symbol,
};

const ICON_DIR: &str = "images/01_SMM_Grundplan";
const CROSSING_ICON_SIZE: f64 = 15.0;

/// The closed set of style variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Crossing types, drawn as SVG icons chosen by attribute priority.
    Crossings,
    /// School-route density, bucketed by pupil count.
    PupilRoutes,
    /// Existing bike-infrastructure inventory, 12-way code enumeration.
    InfrastructureInventory,
    /// Recommended measure: route line plus highlighted node markers.
    RecommendedMeasures,
    /// Protected areas, uniform polygons in their own pane.
    ProtectedAreas,
    /// Photo documentation points.
    PhotoPoints,
}

impl VariantKind {
    /// Resolve a registered variant name. The original German class names
    /// remain valid aliases so existing project configs keep working.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Crossings" | "Querungen" => Some(Self::Crossings),
            "PupilRoutes" | "Laufrouten" => Some(Self::PupilRoutes),
            "InfrastructureInventory" | "Fuehrungsform" => Some(Self::InfrastructureInventory),
            "RecommendedMeasures" | "Massnahmen" => Some(Self::RecommendedMeasures),
            "ProtectedAreas" | "Schutzgebiete" => Some(Self::ProtectedAreas),
            "PhotoPoints" | "Fotopunkte" => Some(Self::PhotoPoints),
            _ => None,
        }
    }

    /// Legend display name used when the project config has none.
    pub fn default_display_name(&self) -> &'static str {
        match self {
            Self::Crossings => "Querungsformen",
            Self::PupilRoutes => "Laufrouten",
            Self::InfrastructureInventory => "Führungsform im Bestand",
            Self::RecommendedMeasures => "Empfehlungsvariante",
            Self::ProtectedAreas => "Schutzgebiete",
            Self::PhotoPoints => "Foto-Dokumentation",
        }
    }

    /// Style rule for line and polygon geometries.
    pub fn vector_style(&self, feature: &Feature) -> StyleDescriptor {
        match self {
            Self::PupilRoutes => pupil_route_style(feature),
            Self::InfrastructureInventory => infrastructure_style(feature),
            Self::RecommendedMeasures => measure_vector_style(feature),
            Self::ProtectedAreas => protected_area_style(),
            // Icon/point variants draw any stray vectors with the default.
            Self::Crossings | Self::PhotoPoints => StyleDescriptor::display_default(),
        }
    }

    /// Point rule; None means points render as the stock pin marker.
    pub fn point_marker(&self, feature: &Feature) -> Option<MarkerSpec> {
        match self {
            Self::Crossings => Some(crossing_marker(feature)),
            Self::RecommendedMeasures => Some(MarkerSpec::Circle {
                radius: 5.0,
                color: Color::new("#eba608"),
                fill_color: Color::new("#ebc508"),
                fill_opacity: 0.9,
                weight: 2.0,
                raise_on_add: true,
            }),
            Self::PhotoPoints => Some(MarkerSpec::Circle {
                radius: 5.0,
                color: Color::new("#599000"),
                fill_color: Color::new("#599000"),
                fill_opacity: 0.9,
                weight: 2.0,
                raise_on_add: true,
            }),
            Self::PupilRoutes | Self::InfrastructureInventory | Self::ProtectedAreas => None,
        }
    }

    /// Which pane this variant's features draw into.
    pub fn pane_for(&self, kind: GeometryKind) -> Pane {
        match (self, kind) {
            (_, GeometryKind::Point) => Pane::Marker,
            (Self::ProtectedAreas, _) => Pane::Polygon,
            _ => Pane::Overlay,
        }
    }
}

/// Build the rendered symbol for one feature under a classified variant,
/// or under generic fallback styling when `variant` is None.
pub fn symbol_for(variant: Option<VariantKind>, feature: &Feature) -> Symbol {
    let kind = feature
        .geometry_kind()
        .unwrap_or(GeometryKind::Point);

    match variant {
        Some(variant) => match kind {
            GeometryKind::Point => match variant.point_marker(feature) {
                Some(marker) => Symbol::from_marker(marker),
                None => Symbol::Icon(IconSymbol::default_pin()),
            },
            GeometryKind::Line => Symbol::from_descriptor(variant.vector_style(feature), false),
            GeometryKind::Polygon => Symbol::from_descriptor(variant.vector_style(feature), true),
        },
        None => generic_symbol(kind),
    }
}

// ============================================================================
// Crossings
// ============================================================================

/// Pick the crossing icon. Conditions are mutually exclusive by evaluation
/// order: the first matching rule wins, signals before markings before
/// structures before traffic calming.
fn crossing_marker(feature: &Feature) -> MarkerSpec {
    let p = &feature.properties;

    let icon = if prop_is(p, "LSA", "1") || prop_is(p, "highway", "traffic_signals") {
        "Ampel_LSA.svg"
    } else if (prop_is(p, "highway", "crossing") && prop_is(p, "crossing", "traffic_signals"))
        || prop_is(p, "fsa", "1")
    {
        "Ampel_FSA.svg"
    } else if prop_is(p, "zebra", "1")
        || (prop_is(p, "highway", "crossing")
            && (prop_is(p, "crossing", "Zebra")
                || prop_is(p, "crossing", "uncontrolled")
                || prop_is(p, "crossing", "marked")))
    {
        "Fußgängerüberweg-Zebrastreifen.svg"
    } else if prop_is(p, "Insel", "1") || prop_is(p, "crossing_i", "1") {
        "Mittelinsel.svg"
    } else if prop_is(p, "Unterfuehr", "1") {
        "Unterführung.svg"
    } else if prop_is(p, "Ueberfuehr", "1") {
        "Brücke_Überführung.svg"
    } else if prop_is(p, "VB", "1") {
        "verkehrsberuhigter_Bereich.svg"
    } else if prop_is(p, "TZ30", "1") {
        "Tempo_30-Zone.svg"
    } else {
        "Mittelinsel.svg"
    };

    MarkerSpec::Icon {
        icon_url: format!("{}/{}", ICON_DIR, icon),
        size: CROSSING_ICON_SIZE,
        original_size: None,
    }
}

// ============================================================================
// Pupil routes
// ============================================================================

/// Pupil-count buckets, ascending and contiguous. Counts outside every
/// bucket (missing or non-numeric) keep the display default stroke.
fn pupil_route_style(feature: &Feature) -> StyleDescriptor {
    let count = prop_f64(&feature.properties, "Anzahl SuS");

    let (color, weight) = match count {
        Some(n) if n <= 2.0 => (Some("#4d4d4d"), 2.0),
        Some(n) if n <= 4.0 => (Some("#b9e1e4"), 3.5),
        Some(n) if n <= 10.0 => (Some("#6688cc"), 4.0),
        Some(n) if n <= 20.0 => (Some("#44bb55"), 5.0),
        Some(n) if n <= 50.0 => (Some("#ee6600"), 6.0),
        Some(_) => (Some("#ee1100"), 7.5),
        None => (None, 3.0),
    };

    StyleDescriptor {
        color: color.map(Color::new),
        fill_color: Some(Color::new("#b9e1e4")),
        fill_opacity: Some(0.2),
        weight,
        label: Some(format!(
            "Anzahl Schulkinder: {}",
            prop_display(&feature.properties, "Anzahl SuS")
        )),
        original_weight: weight,
        pane: Pane::Overlay,
    }
}

// ============================================================================
// Infrastructure inventory
// ============================================================================

/// 12-way enumeration over the "Bestand" code. Codes outside 1–12 keep the
/// variant default.
fn infrastructure_style(feature: &Feature) -> StyleDescriptor {
    let coded: Option<(&str, &str)> = [
        ("1", "#33a02c", "Radfahrstreifen"),
        ("2", "#8d5a99", "Schutzstreifen"),
        ("3", "#4628bb", " Getrennter Geh- und Radweg"),
        ("4", "#4362ff", "Gemeinsamer Geh- und Radweg"),
        ("5", "#a6cee3", "Mischverkehr"),
        ("6", "#c5886d", "Land- und Forstwirtschaftlicher Weg"),
        ("7", "#191919", "unklar/unbekannt"),
        ("8", "#c40300", "Netzlücke/ kein Weg/ Verbot Radverkehr"),
        ("9", "#fb9a99", "Ingenieurbauwerk"),
        ("10", "#ff7f00", "Gehweg + Rad frei/Fußgängerzone"),
        ("11", "#4362ff", "Radweg im Bau"),
        ("12", "#e1be24", "Verkehrsberuhigter Bereich"),
    ]
    .iter()
    .find(|(code, _, _)| prop_is(&feature.properties, "Bestand", code))
    .map(|(_, color, label)| (*color, *label));

    let (color, label) = match coded {
        Some((color, label)) => (color, Some(label.to_string())),
        None => ("#d5ff01", None),
    };

    StyleDescriptor {
        color: Some(Color::new(color)),
        fill_color: None,
        fill_opacity: None,
        weight: 5.0,
        label,
        original_weight: 5.0,
        pane: Pane::Overlay,
    }
}

// ============================================================================
// Recommended measures, protected areas, generic
// ============================================================================

fn measure_vector_style(feature: &Feature) -> StyleDescriptor {
    let color = match feature.geometry_kind() {
        Some(GeometryKind::Line) => Some(Color::new("#4555e4")),
        _ => None,
    };
    StyleDescriptor {
        color,
        fill_color: None,
        fill_opacity: None,
        weight: 5.0,
        label: None,
        original_weight: 5.0,
        pane: Pane::Overlay,
    }
}

fn protected_area_style() -> StyleDescriptor {
    StyleDescriptor {
        color: Some(Color::new("#487008")),
        fill_color: None,
        fill_opacity: Some(0.7),
        weight: 2.0,
        label: None,
        original_weight: 2.0,
        pane: Pane::Polygon,
    }
}

fn generic_symbol(kind: GeometryKind) -> Symbol {
    match kind {
        GeometryKind::Point => Symbol::from_marker(MarkerSpec::Circle {
            radius: 7.0,
            color: Color::new("#ffffff"),
            fill_color: Color::new("#fc7300"),
            fill_opacity: 0.8,
            weight: 3.0,
            raise_on_add: false,
        }),
        kind => {
            let descriptor = StyleDescriptor {
                color: None,
                fill_color: Some(Color::new("#fc7300")),
                fill_opacity: None,
                weight: 5.0,
                label: None,
                original_weight: 5.0,
                pane: Pane::Overlay,
            };
            Symbol::from_descriptor(descriptor, kind == GeometryKind::Polygon)
        }
    }
}
