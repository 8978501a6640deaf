//! Layer collection building.
//!
//! Turns a directory of GeoJSON files into installed, styled, legend-
//! registered layers. The geo-data listing and the photo listing are
//! fetched concurrently and joined; either source failing degrades to an
//! empty list so the other still renders. Within the build, every file is
//! its own failure domain: a malformed collection or an unsupported CRS
//! skips that file with a warning and the rest of the map still loads.

use atlas_common::geojson::{FeatureCollection, GeometryKind};
use atlas_common::{AtlasError, AtlasResult, FeatureId, FileEntry, FilePayload, ProjectConfig};
use projection::Projector;
use tracing::{info, instrument, warn};

use crate::classify::Classifier;
use crate::fetch::DirectoryClient;
use crate::layer::{Layer, RenderedFeature};
use crate::pane::Pane;
use crate::session::{MapSession, DEFAULT_ZOOM};
use crate::variant::symbol_for;

pub struct LayerCollectionBuilder {
    config: ProjectConfig,
    classifier: Classifier,
}

impl LayerCollectionBuilder {
    /// Build against a project config. Classification rules come from the
    /// config; a config without any falls back to the built-in
    /// registration.
    pub fn new(config: ProjectConfig) -> Self {
        let classifier = if config.class_search_terms.is_empty() {
            Classifier::builtin()
        } else {
            Classifier::from_config(&config)
        };
        Self { config, classifier }
    }

    /// Fetch both directory listings and build the session.
    #[instrument(skip(self, client))]
    pub async fn build(
        &self,
        client: &DirectoryClient,
        geo_dir: &str,
        photo_dir: &str,
    ) -> MapSession {
        let (files, photos) = tokio::join!(
            client.fetch_file_list_and_data(geo_dir),
            client.fetch_file_list(photo_dir),
        );

        let files = files.unwrap_or_else(|e| {
            warn!(directory = geo_dir, error = %e, "geo-data listing failed, rendering empty map");
            Vec::new()
        });
        let photos = photos.unwrap_or_else(|e| {
            warn!(directory = photo_dir, error = %e, "photo listing failed, continuing without images");
            Vec::new()
        });

        self.build_from_payloads(files, photos)
    }

    /// Build the session from already-fetched payloads.
    pub fn build_from_payloads(
        &self,
        files: Vec<FilePayload>,
        photos: Vec<FileEntry>,
    ) -> MapSession {
        let mut session = MapSession::new(DEFAULT_ZOOM);
        let mut next_id = 0u64;
        let mut loaded = 0usize;

        for file in &files {
            if !file.is_json() {
                continue;
            }
            match self.build_layer(file, &photos, &mut next_id) {
                Ok((layer, show_on_start)) => {
                    info!(
                        file = %file.name,
                        layer = %layer.display_name,
                        features = layer.features.len(),
                        "loaded layer"
                    );
                    session.install_layer(layer, show_on_start);
                    loaded += 1;
                }
                Err(e) => warn!(file = %file.name, error = %e, "skipping file"),
            }
        }

        info!(loaded, total = files.len(), "layer build complete");
        // Symbols start out sized for the initial zoom.
        session.rescale_all();
        session
    }

    fn build_layer(
        &self,
        file: &FilePayload,
        photos: &[FileEntry],
        next_id: &mut u64,
    ) -> AtlasResult<(Layer, bool)> {
        let stem = file.stem();

        let mut collection: FeatureCollection = serde_json::from_value(file.data.clone())
            .map_err(|e| AtlasError::malformed(&file.name, e.to_string()))?;

        // The CRS guard runs before anything else touches coordinates;
        // unsupported systems skip the file here.
        let projector = Projector::for_crs_name(collection.crs_name())?;
        if !matches!(projector, Projector::Identity) {
            collection.project_in_place(&|x, y| projector.to_wgs84(x, y));
        }

        let variant = self.classifier.classify(stem).variant();
        let key = self.config_key(stem, collection.name.as_deref()).to_string();

        let display_name = self
            .config
            .display_name(&key)
            .map(|s| s.to_string())
            .or_else(|| variant.map(|v| v.default_display_name().to_string()))
            .unwrap_or_else(|| stem.to_string());

        // Unlisted files still get a layer and a legend row, but stay off
        // the map and unbound until toggled on.
        let settings = self.config.settings(&key);
        let show_popup = settings.map(|s| s.show_popup_when_clicked()).unwrap_or(false);
        let show_on_start = settings.map(|s| s.show_on_start()).unwrap_or(false);
        let always_clickable = settings.map(|s| s.always_clickable()).unwrap_or(false);
        let load_images = settings.map(|s| s.load_images()).unwrap_or(false);
        let show_as_popup = settings.map(|s| s.show_as_popup()).unwrap_or(false);

        let images = if load_images {
            photos
                .iter()
                .filter(|photo| photo.path.contains(key.as_str()))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let mut features = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let Some(kind) = feature.geometry_kind() else {
                // Geometry-less records carry attributes only.
                continue;
            };
            let symbol = symbol_for(variant, &feature);
            let pane = match variant {
                Some(v) => v.pane_for(kind),
                None if kind == GeometryKind::Point => Pane::Marker,
                None => Pane::Overlay,
            };
            let tooltip = feature.name().map(|s| s.to_string());

            features.push(RenderedFeature {
                id: FeatureId(*next_id),
                feature,
                symbol,
                pane,
                always_clickable,
                has_click_handler: show_popup,
                hovered: false,
                tooltip,
            });
            *next_id += 1;
        }

        let layer = Layer {
            display_name,
            source_file_name: stem.to_string(),
            variant,
            visible_property_names: self.config.properties_to_show(&key).to_vec(),
            excluded_property_names: self.config.properties_to_exclude(&key).to_vec(),
            property_rename_map: self.config.rename_map(&key).cloned().unwrap_or_default(),
            images,
            show_as_popup,
            features,
        };

        Ok((layer, show_on_start))
    }

    /// Configuration key for a data file: the file stem when the config
    /// mentions it, otherwise the collection's embedded name.
    fn config_key<'a>(&self, stem: &'a str, collection_name: Option<&'a str>) -> &'a str {
        if self.config.mentions(stem) {
            return stem;
        }
        if let Some(name) = collection_name {
            if self.config.mentions(name) {
                return name;
            }
        }
        stem
    }
}
