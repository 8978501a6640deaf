//! The live map session.
//!
//! Owns the loaded layers, the render-membership set (the single source of
//! truth for "is this feature on the map"), and the legend. User
//! interaction funnels through here: zoom changes rescale symbols, clicks
//! run the hit tester, legend toggles add and remove features.

use std::collections::HashSet;

use atlas_common::{Color, FeatureId};
use legend::{Legend, MapMembership};
use tracing::warn;

use crate::hit::{resolve_click, HitDecision};
use crate::layer::{Layer, RenderedFeature};
use crate::popup::{build_popup, PopupContent, PopupRouting, FURTHER_INFO_PANEL};
use crate::scale::rescale_symbol;
use crate::style::Symbol;

/// Initial zoom of the viewer.
pub const DEFAULT_ZOOM: f64 = 12.0;

const HOVER_FACTOR: f64 = 1.25;
const HOVER_FACTOR_CIRCLE: f64 = 1.5;

/// The sidebar collaborator: named panels the session can open and close.
pub trait Sidebar {
    fn open(&mut self, panel_id: &str);
    fn close(&mut self);
}

/// Render membership: which features are currently attached to the map.
#[derive(Debug, Default)]
pub struct MembershipSet {
    on_map: HashSet<FeatureId>,
}

impl MembershipSet {
    pub fn contains(&self, id: FeatureId) -> bool {
        self.on_map.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.on_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_map.is_empty()
    }
}

impl MapMembership for MembershipSet {
    fn has(&self, id: FeatureId) -> bool {
        self.on_map.contains(&id)
    }
    fn add(&mut self, id: FeatureId) {
        self.on_map.insert(id);
    }
    fn remove(&mut self, id: FeatureId) {
        self.on_map.remove(&id);
    }
}

/// Result of dispatching a map click.
#[derive(Debug)]
pub enum ClickOutcome {
    /// The click reached a feature; content and routing are resolved.
    Dispatched {
        feature_id: FeatureId,
        content: PopupContent,
        routing: PopupRouting,
    },
    /// Nothing qualified: the info panel shows the no-information message.
    NoInformation,
}

pub struct MapSession {
    zoom: f64,
    layers: Vec<Layer>,
    membership: MembershipSet,
    legend: Legend,
}

impl MapSession {
    pub fn new(zoom: f64) -> Self {
        Self {
            zoom,
            layers: Vec::new(),
            membership: MembershipSet::default(),
            legend: Legend::new(),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn has_feature(&self, id: FeatureId) -> bool {
        self.membership.contains(id)
    }

    /// Number of features currently attached to the map.
    pub fn rendered_count(&self) -> usize {
        self.membership.len()
    }

    pub fn find_feature(&self, id: FeatureId) -> Option<(&Layer, &RenderedFeature)> {
        self.layers
            .iter()
            .find_map(|layer| layer.feature(id).map(|f| (layer, f)))
    }

    /// Install a built layer: optionally attach its features to the map,
    /// then register it with the legend. Registration happens for every
    /// layer, visible at start or not.
    pub fn install_layer(&mut self, layer: Layer, show_on_start: bool) {
        if show_on_start {
            for feature in &layer.features {
                self.membership.add(feature.id);
            }
        }
        self.legend.register_layer(
            &layer.display_name,
            layer.registration_entries(),
            &self.membership,
        );
        self.layers.push(layer);
    }

    /// Parent legend checkbox toggle.
    pub fn set_layer_visible(&mut self, label: &str, visible: bool) -> bool {
        let changed = self
            .legend
            .set_layer_checked(label, visible, &mut self.membership);
        if changed && visible {
            // Freshly added symbols must match the current zoom.
            self.rescale_all();
        }
        changed
    }

    /// Color sub-group checkbox toggle.
    pub fn set_color_group_visible(
        &mut self,
        label: &str,
        color: Option<&Color>,
        visible: bool,
    ) -> bool {
        let changed =
            self.legend
                .set_group_checked(label, color, visible, &mut self.membership);
        if changed && visible {
            self.rescale_all();
        }
        changed
    }

    /// Re-derive legend checkboxes from the membership set.
    pub fn sync_legend(&mut self) {
        self.legend.sync_with_map(&self.membership);
    }

    /// Zoom change: every symbol recomputes from its baselines.
    pub fn on_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.rescale_all();
    }

    /// Rescale all symbols to the current zoom. Safe to call repeatedly:
    /// sizes derive from `original_*` baselines, never from themselves.
    pub fn rescale_all(&mut self) {
        for layer in &mut self.layers {
            for feature in &mut layer.features {
                rescale_symbol(&mut feature.symbol, self.zoom);
            }
        }
    }

    /// Dispatch a map click. At most one feature receives it; content is
    /// routed to a floating popup or the sidebar's info panel.
    pub fn handle_click(&self, lon: f64, lat: f64, sidebar: &mut dyn Sidebar) -> ClickOutcome {
        let on_map = self
            .layers
            .iter()
            .flat_map(|layer| layer.features.iter())
            .filter(|f| self.membership.contains(f.id));

        match resolve_click(on_map, lon, lat) {
            HitDecision::Feature(id) => {
                let Some((layer, feature)) = self.find_feature(id) else {
                    warn!(%id, "hit tester returned an unknown feature");
                    return ClickOutcome::NoInformation;
                };
                let content = build_popup(layer, feature);
                // Floating popups are opt-in per layer; everything else
                // lands in the sidebar panel.
                let routing = if layer.show_as_popup {
                    content.routing()
                } else {
                    PopupRouting::SidebarPanel
                };
                if routing == PopupRouting::SidebarPanel {
                    sidebar.open(FURTHER_INFO_PANEL);
                }
                ClickOutcome::Dispatched {
                    feature_id: id,
                    content,
                    routing,
                }
            }
            HitDecision::NoInformation => ClickOutcome::NoInformation,
        }
    }

    /// Hover enlargement. Enter/leave transitions scale the symbol's
    /// current size; mismatched repeats are ignored.
    pub fn set_hovered(&mut self, id: FeatureId, hovered: bool) {
        for layer in &mut self.layers {
            if let Some(feature) = layer.features.iter_mut().find(|f| f.id == id) {
                if feature.hovered == hovered {
                    return;
                }
                feature.hovered = hovered;
                apply_hover(&mut feature.symbol, hovered);
                return;
            }
        }
    }
}

fn apply_hover(symbol: &mut Symbol, entering: bool) {
    let factor = |base: f64| if entering { base } else { 1.0 / base };
    match symbol {
        Symbol::Line(vector) | Symbol::Polygon(vector) => {
            vector.weight *= factor(HOVER_FACTOR);
        }
        Symbol::Circle(circle) => {
            circle.radius *= factor(HOVER_FACTOR_CIRCLE);
        }
        Symbol::Icon(icon) => {
            icon.icon_size[0] *= factor(HOVER_FACTOR);
            icon.icon_size[1] *= factor(HOVER_FACTOR);
        }
    }
}
