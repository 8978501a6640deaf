//! Layers and rendered features.

use std::collections::HashMap;

use atlas_common::geojson::Feature;
use atlas_common::{FeatureId, FileEntry};
use legend::{ExampleSymbol, RegistrationEntry};

use crate::pane::Pane;
use crate::style::Symbol;
use crate::variant::VariantKind;

/// One feature as placed on the map: source record plus its computed
/// symbol, pane and interactivity flags.
#[derive(Debug, Clone)]
pub struct RenderedFeature {
    pub id: FeatureId,
    pub feature: Feature,
    pub symbol: Symbol,
    pub pane: Pane,
    /// Receives clicks even when an unresponsive feature is drawn on top.
    pub always_clickable: bool,
    /// A click listener was bound (popup display enabled for the layer).
    pub has_click_handler: bool,
    pub hovered: bool,
    /// Hover tooltip, taken from the feature's `name` attribute.
    pub tooltip: Option<String>,
}

impl RenderedFeature {
    /// The legend registration entry for this feature.
    pub fn registration_entry(&self) -> RegistrationEntry {
        let example = match &self.symbol {
            Symbol::Circle(c) => ExampleSymbol {
                has_radius: true,
                is_polygon: false,
                fill_color: Some(c.fill_color.clone()),
            },
            Symbol::Polygon(v) => ExampleSymbol {
                has_radius: false,
                is_polygon: true,
                fill_color: v.fill_color.clone(),
            },
            Symbol::Line(v) => ExampleSymbol {
                has_radius: false,
                is_polygon: false,
                fill_color: v.fill_color.clone(),
            },
            Symbol::Icon(_) => ExampleSymbol {
                has_radius: false,
                is_polygon: false,
                fill_color: None,
            },
        };

        RegistrationEntry {
            feature_id: self.id,
            color: self.symbol.stroke_color().cloned(),
            label: self.symbol.label().map(|s| s.to_string()),
            example,
        }
    }
}

/// An ordered collection of rendered features sharing one style variant,
/// plus its popup metadata from the project config.
#[derive(Debug, Clone)]
pub struct Layer {
    pub display_name: String,
    pub source_file_name: String,
    /// None for generically styled layers.
    pub variant: Option<VariantKind>,
    /// Attributes to show in popups; empty means all minus excluded.
    pub visible_property_names: Vec<String>,
    pub excluded_property_names: Vec<String>,
    /// Source attribute name → display name.
    pub property_rename_map: HashMap<String, String>,
    /// Photo attachments resolved for this layer, if image loading is on.
    pub images: Vec<FileEntry>,
    /// Prefer a floating popup over the sidebar panel.
    pub show_as_popup: bool,
    pub features: Vec<RenderedFeature>,
}

impl Layer {
    pub fn feature(&self, id: FeatureId) -> Option<&RenderedFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Legend registration entries for all features, in order.
    pub fn registration_entries(&self) -> Vec<RegistrationEntry> {
        self.features.iter().map(|f| f.registration_entry()).collect()
    }
}
