//! Inline legend symbols.
//!
//! A legend row carries a small symbol matching how its features are drawn:
//! a filled circle for circle markers, a parallelogram for polygons, a
//! stroke swatch for lines. Rows without a stroke color (icon markers) get
//! no symbol.

use atlas_common::Color;
use serde::{Deserialize, Serialize};

/// Shape information of the example feature a symbol is derived from.
#[derive(Debug, Clone)]
pub struct ExampleSymbol {
    /// The feature renders as a circle marker (has a radius).
    pub has_radius: bool,
    /// The feature is a polygon.
    pub is_polygon: bool,
    pub fill_color: Option<Color>,
}

/// The symbol rendered next to a legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendSymbol {
    Circle { color: Color, fill_color: Option<Color> },
    Parallelogram { color: Color, fill_color: Option<Color> },
    Stroke { color: Color },
}

impl LegendSymbol {
    /// Pick the symbol for an example feature; None when there is no stroke
    /// color to derive it from.
    pub fn for_example(example: &ExampleSymbol, color: Option<&Color>) -> Option<Self> {
        let color = color?.clone();
        if example.has_radius {
            Some(LegendSymbol::Circle {
                color,
                fill_color: example.fill_color.clone(),
            })
        } else if example.is_polygon {
            Some(LegendSymbol::Parallelogram {
                color,
                fill_color: example.fill_color.clone(),
            })
        } else {
            Some(LegendSymbol::Stroke { color })
        }
    }
}
