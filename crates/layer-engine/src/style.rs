//! Style descriptors and rendered-symbol primitives.
//!
//! A style rule evaluates a feature's attributes into a `StyleDescriptor`
//! (for vector geometries) or a `MarkerSpec` (for points). Both carry
//! `original_*` baseline fields: the symbol scaler always derives displayed
//! sizes from these, never from the previously scaled value, so repeated
//! rescaling at one zoom level cannot compound.

use atlas_common::Color;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pane::Pane;

/// Output of a vector style rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleDescriptor {
    /// Stroke color; None renders with the display default.
    pub color: Option<Color>,
    pub fill_color: Option<Color>,
    pub fill_opacity: Option<f64>,
    pub weight: f64,
    /// Label of the feature's color group in the legend.
    pub label: Option<String>,
    /// Scaling baseline; never overwritten after construction.
    pub original_weight: f64,
    pub pane: Pane,
}

impl StyleDescriptor {
    /// Display-default line style (blue, weight 3).
    pub fn display_default() -> Self {
        Self::line(None, 3.0)
    }

    pub fn line(color: Option<Color>, weight: f64) -> Self {
        Self {
            color,
            fill_color: None,
            fill_opacity: None,
            weight,
            label: None,
            original_weight: weight,
            pane: Pane::Overlay,
        }
    }
}

/// Output of a point style rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MarkerSpec {
    Circle {
        radius: f64,
        color: Color,
        fill_color: Color,
        fill_opacity: f64,
        weight: f64,
        /// Re-raise to the top of the draw order whenever added.
        raise_on_add: bool,
    },
    Icon {
        icon_url: String,
        size: f64,
        /// Explicit baseline for proportional zoom scaling; icons without
        /// one scale to the zoom size directly.
        original_size: Option<f64>,
    },
}

/// A feature's symbol as currently rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Symbol {
    Line(VectorSymbol),
    Polygon(VectorSymbol),
    Circle(CircleSymbol),
    Icon(IconSymbol),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSymbol {
    pub color: Option<Color>,
    pub fill_color: Option<Color>,
    pub fill_opacity: Option<f64>,
    pub weight: f64,
    pub label: Option<String>,
    pub original_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleSymbol {
    pub color: Color,
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub radius: f64,
    pub weight: f64,
    pub raise_on_add: bool,
    pub original_radius: f64,
    pub original_stroke_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconSymbol {
    pub icon_url: String,
    pub icon_size: [f64; 2],
    pub icon_anchor: Option<[f64; 2]>,
    pub shadow_size: Option<[f64; 2]>,
    pub original_size: Option<f64>,
    /// The stock pin marker keeps its 25:41 silhouette under scaling.
    pub default_pin: bool,
}

impl IconSymbol {
    /// The stock pin used when a variant defines no point rule.
    pub fn default_pin() -> Self {
        Self {
            icon_url: "marker-icon.png".to_string(),
            icon_size: [25.0, 41.0],
            icon_anchor: Some([12.5, 41.0]),
            shadow_size: Some([41.0, 41.0]),
            original_size: None,
            default_pin: true,
        }
    }
}

impl Symbol {
    pub fn from_descriptor(descriptor: StyleDescriptor, polygon: bool) -> Self {
        let vector = VectorSymbol {
            color: descriptor.color,
            fill_color: descriptor.fill_color,
            fill_opacity: descriptor.fill_opacity,
            weight: descriptor.weight,
            label: descriptor.label,
            original_weight: descriptor.original_weight,
        };
        if polygon {
            Symbol::Polygon(vector)
        } else {
            Symbol::Line(vector)
        }
    }

    pub fn from_marker(marker: MarkerSpec) -> Self {
        match marker {
            MarkerSpec::Circle {
                radius,
                color,
                fill_color,
                fill_opacity,
                weight,
                raise_on_add,
            } => Symbol::Circle(CircleSymbol {
                color,
                fill_color,
                fill_opacity,
                radius,
                weight,
                raise_on_add,
                original_radius: radius,
                original_stroke_width: weight,
            }),
            MarkerSpec::Icon {
                icon_url,
                size,
                original_size,
            } => Symbol::Icon(IconSymbol {
                icon_url,
                icon_size: [size, size],
                icon_anchor: None,
                shadow_size: None,
                original_size,
                default_pin: false,
            }),
        }
    }

    /// Stroke color for legend grouping; icon markers have none.
    pub fn stroke_color(&self) -> Option<&Color> {
        match self {
            Symbol::Line(v) | Symbol::Polygon(v) => v.color.as_ref(),
            Symbol::Circle(c) => Some(&c.color),
            Symbol::Icon(_) => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Symbol::Line(v) | Symbol::Polygon(v) => v.label.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// Attribute access
// ============================================================================

/// Loose equality against an attribute, the way the style rules compare:
/// `"1"` matches both the string `"1"` and the number `1`.
pub fn prop_is(properties: &Map<String, Value>, key: &str, expected: &str) -> bool {
    match properties.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => match (n.as_f64(), expected.parse::<f64>()) {
            (Some(actual), Ok(wanted)) => actual == wanted,
            _ => false,
        },
        _ => false,
    }
}

/// Attribute as a number; numeric strings count.
pub fn prop_f64(properties: &Map<String, Value>, key: &str) -> Option<f64> {
    match properties.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Attribute as display text for labels and popup rows; null is "N/A".
pub fn prop_display(properties: &Map<String, Value>, key: &str) -> String {
    match properties.get(key) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
