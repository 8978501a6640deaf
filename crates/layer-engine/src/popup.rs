//! Popup content assembly for clicked features.
//!
//! Rows come from the feature's attributes filtered through the layer's
//! show-list and exclude-list and renamed through its rename map, in source
//! attribute order. Photo attachments resolve by file-name substring. A
//! popup consisting of exactly one image and no rows floats over the map;
//! everything else goes to the sidebar's info panel.

use atlas_common::FileEntry;
use serde_json::Value;

use crate::layer::{Layer, RenderedFeature};

/// Sidebar panel that receives non-floating popup content.
pub const FURTHER_INFO_PANEL: &str = "furtherInfoPanel";

/// Message shown when a click resolves to nothing clickable.
pub const NO_INFORMATION_MESSAGE: &str = "Keine Informationen verfügbar.";

/// One "name: value" row of popup content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRow {
    pub name: String,
    pub value: String,
}

/// Assembled popup content for one clicked feature.
#[derive(Debug, Clone, Default)]
pub struct PopupContent {
    pub rows: Vec<PopupRow>,
    pub images: Vec<FileEntry>,
}

/// Where the content surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupRouting {
    /// A floating popup anchored to the feature.
    Floating,
    /// The sidebar's further-info panel.
    SidebarPanel,
}

impl PopupContent {
    /// One lone image with no attribute rows floats; everything else goes
    /// to the sidebar.
    pub fn routing(&self) -> PopupRouting {
        if self.rows.is_empty() && self.images.len() == 1 {
            PopupRouting::Floating
        } else {
            PopupRouting::SidebarPanel
        }
    }
}

/// Assemble the popup for a clicked feature of a layer.
pub fn build_popup(layer: &Layer, rendered: &RenderedFeature) -> PopupContent {
    PopupContent {
        rows: build_rows(layer, rendered),
        images: attachments_for(layer, rendered),
    }
}

/// Attribute rows in source order. An empty show-list means "everything";
/// the exclude-list always wins.
fn build_rows(layer: &Layer, rendered: &RenderedFeature) -> Vec<PopupRow> {
    let show = &layer.visible_property_names;
    let exclude = &layer.excluded_property_names;

    rendered
        .feature
        .properties
        .iter()
        .filter(|(name, _)| show.is_empty() || show.iter().any(|s| s == *name))
        .filter(|(name, _)| !exclude.iter().any(|e| e == *name))
        .map(|(name, value)| {
            let display_name = layer
                .property_rename_map
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.clone());
            PopupRow {
                name: display_name,
                value: display_value(value),
            }
        })
        .collect()
}

/// Photo attachments whose file name contains the feature's `filename`
/// attribute.
fn attachments_for(layer: &Layer, rendered: &RenderedFeature) -> Vec<FileEntry> {
    let Some(Value::String(filename)) = rendered.feature.property("filename") else {
        return Vec::new();
    };
    layer
        .images
        .iter()
        .filter(|image| image.name.contains(filename.as_str()))
        .cloned()
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
