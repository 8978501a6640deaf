//! Project configuration snapshot.
//!
//! One YAML file is the single source of truth for how data files appear in
//! the viewer: display names, which attributes show up in popups, attribute
//! renames, per-file behavior flags, and the search terms that bind files
//! to style variants. It is loaded once at startup and passed explicitly to
//! the builder and the legend — nothing reads it as ambient state.
//!
//! Keys are file names without extension, exactly as uploaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AtlasError, AtlasResult};

/// Everything the viewer knows about the current project's data files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// File name → display name shown in the legend.
    #[serde(default)]
    pub layer_names: HashMap<String, String>,

    /// File name → attributes to show in popups. An empty list means
    /// "all attributes minus the excluded ones".
    #[serde(default)]
    pub properties_to_show: HashMap<String, Vec<String>>,

    /// File name → attributes never shown in popups. Exclusion wins when an
    /// attribute appears in both lists.
    #[serde(default)]
    pub properties_to_exclude: HashMap<String, Vec<String>>,

    /// File name → (source attribute name → display name).
    #[serde(default)]
    pub property_rename_map: HashMap<String, HashMap<String, String>>,

    /// File name → behavior flags. A file with no entry here still gets a
    /// legend row, but is neither shown at start nor click-bound.
    #[serde(default)]
    pub layer_settings: HashMap<String, LayerSettings>,

    /// Style-variant search terms, in registration order. Classification
    /// scans these top to bottom; first match wins.
    #[serde(default)]
    pub class_search_terms: Vec<ClassRule>,
}

impl ProjectConfig {
    /// Load the project configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AtlasError::ConfigError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse the project configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> AtlasResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| AtlasError::ConfigError(e.to_string()))
    }

    pub fn display_name(&self, file: &str) -> Option<&str> {
        self.layer_names.get(file).map(|s| s.as_str())
    }

    pub fn properties_to_show(&self, file: &str) -> &[String] {
        self.properties_to_show
            .get(file)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn properties_to_exclude(&self, file: &str) -> &[String] {
        self.properties_to_exclude
            .get(file)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn rename_map(&self, file: &str) -> Option<&HashMap<String, String>> {
        self.property_rename_map.get(file)
    }

    /// Behavior flags for a file, or None when the file is unlisted.
    pub fn settings(&self, file: &str) -> Option<&LayerSettings> {
        self.layer_settings.get(file)
    }

    /// Whether any configuration section mentions this key. Data files can
    /// be configured under their file stem or under the collection name
    /// embedded in the GeoJSON; the builder probes both.
    pub fn mentions(&self, key: &str) -> bool {
        self.layer_names.contains_key(key)
            || self.properties_to_show.contains_key(key)
            || self.properties_to_exclude.contains_key(key)
            || self.property_rename_map.contains_key(key)
            || self.layer_settings.contains_key(key)
    }
}

/// Per-file behavior flags. Unset flags fall back to the documented
/// defaults for *listed* files; see `ProjectConfig::settings` for the
/// unlisted case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerSettings {
    /// Show popup/sidebar content when features are clicked. Default true.
    #[serde(default)]
    pub show_popup_for_layer_when_clicked: Option<bool>,

    /// Add the layer to the map at startup. Default true.
    #[serde(default)]
    pub show_layer_on_start: Option<bool>,

    /// Deliver clicks to this layer even when an unresponsive layer is
    /// drawn over it. Default false.
    #[serde(default)]
    pub always_keep_clickable: Option<bool>,

    /// Resolve photo attachments for this layer's features. Default false.
    #[serde(default)]
    pub load_images: Option<bool>,

    /// Prefer a floating popup over the sidebar panel. Default false.
    #[serde(default)]
    pub show_as_pop_up: Option<bool>,
}

impl LayerSettings {
    pub fn show_popup_when_clicked(&self) -> bool {
        self.show_popup_for_layer_when_clicked.unwrap_or(true)
    }

    pub fn show_on_start(&self) -> bool {
        self.show_layer_on_start.unwrap_or(true)
    }

    pub fn always_clickable(&self) -> bool {
        self.always_keep_clickable.unwrap_or(false)
    }

    pub fn load_images(&self) -> bool {
        self.load_images.unwrap_or(false)
    }

    pub fn show_as_popup(&self) -> bool {
        self.show_as_pop_up.unwrap_or(false)
    }
}

/// Binds a style-variant name to its file-name search terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRule {
    /// Variant name as registered by the layer engine (e.g. "Crossings").
    pub variant: String,

    /// One or more substrings matched against the full file name.
    pub terms: SearchTerms,
}

/// One search term or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchTerms {
    One(String),
    Many(Vec<String>),
}

impl SearchTerms {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            SearchTerms::One(term) => std::slice::from_ref(term).iter(),
            SearchTerms::Many(terms) => terms.iter(),
        }
        .map(|s| s.as_str())
    }
}
