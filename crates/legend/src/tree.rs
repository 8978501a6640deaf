//! The visibility-control tree.
//!
//! One node per layer, one color group per distinct stroke color within the
//! layer. The tree never stores authoritative visibility itself: the map's
//! render membership is the source of truth, and checkbox state is derived
//! from it on registration and on demand.
//!
//! Presentation is a projection of this state: a node with exactly one
//! color group renders as a single row with an inline symbol
//! (`inline_symbol`), a node with more renders a collapsible sub-list
//! (`has_sub_list`). Enabled/expanded are explicit booleans here, not
//! display-layer artifacts.
//!
//! The propagation rules are deliberately asymmetric: checking a parent
//! re-checks and re-enables every child, unchecking it removes all features
//! but leaves child checkmarks untouched (rows render disabled), and
//! unchecking every child does not uncheck the parent.

use atlas_common::{Color, FeatureId};
use tracing::warn;

use crate::symbol::{ExampleSymbol, LegendSymbol};

/// Render membership of the map, as seen by the legend.
pub trait MapMembership {
    fn has(&self, id: FeatureId) -> bool;
    fn add(&mut self, id: FeatureId);
    fn remove(&mut self, id: FeatureId);
}

/// What a layer hands the legend on registration: one entry per feature.
#[derive(Debug, Clone)]
pub struct RegistrationEntry {
    pub feature_id: FeatureId,
    /// Stroke color; icon markers have none.
    pub color: Option<Color>,
    /// Style label for the feature's color group, e.g. "Schutzstreifen".
    pub label: Option<String>,
    pub example: ExampleSymbol,
}

/// A per-color child row.
#[derive(Debug, Clone)]
pub struct ColorGroup {
    pub color: Option<Color>,
    pub label: String,
    pub checked: bool,
    /// Visual cue only; set from the parent's state when the row is created
    /// or toggled, never re-evaluated continuously.
    pub enabled: bool,
    pub symbol: Option<LegendSymbol>,
    pub feature_ids: Vec<FeatureId>,
}

/// One legend row per layer.
#[derive(Debug, Clone)]
pub struct VisibilityNode {
    pub label: String,
    pub checked: bool,
    /// Child list collapsed/expanded state; meaningless without a sub-list.
    pub expanded: bool,
    pub groups: Vec<ColorGroup>,
    feature_ids: Vec<FeatureId>,
}

impl VisibilityNode {
    pub fn feature_ids(&self) -> &[FeatureId] {
        &self.feature_ids
    }

    /// A node renders its children as a nested list only when features
    /// split into more than one color.
    pub fn has_sub_list(&self) -> bool {
        self.groups.len() > 1
    }

    /// The inline symbol of a single-color node; None when the node renders
    /// a sub-list (or has no symbol-bearing color at all).
    pub fn inline_symbol(&self) -> Option<&LegendSymbol> {
        match self.groups.as_slice() {
            [only] => only.symbol.as_ref(),
            _ => None,
        }
    }

    fn group_mut(&mut self, color: Option<&Color>) -> Option<&mut ColorGroup> {
        self.groups.iter_mut().find(|g| g.color.as_ref() == color)
    }
}

/// The legend: an ordered list of visibility nodes keyed by display name.
///
/// Keying by name is intentional — two files sharing a display name merge
/// into one node, exactly like rows merged in the original sidebar.
#[derive(Debug, Default)]
pub struct Legend {
    nodes: Vec<VisibilityNode>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[VisibilityNode] {
        &self.nodes
    }

    pub fn node(&self, label: &str) -> Option<&VisibilityNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    fn node_mut(&mut self, label: &str) -> Option<&mut VisibilityNode> {
        self.nodes.iter_mut().find(|n| n.label == label)
    }

    /// Register a layer's features under `label`, creating the node on
    /// first sight. The node's checkbox is derived from current map
    /// membership; color rows default to checked, and start disabled when
    /// the parent is unchecked at creation time.
    pub fn register_layer(
        &mut self,
        label: &str,
        entries: Vec<RegistrationEntry>,
        map: &dyn MapMembership,
    ) {
        if entries.is_empty() {
            warn!(layer = label, "registering layer with no features");
        }
        let any_on_map = entries.iter().any(|e| map.has(e.feature_id));

        let index = match self.nodes.iter().position(|n| n.label == label) {
            Some(index) => index,
            None => {
                self.nodes.push(VisibilityNode {
                    label: label.to_string(),
                    checked: any_on_map,
                    expanded: true,
                    groups: Vec::new(),
                    feature_ids: Vec::new(),
                });
                self.nodes.len() - 1
            }
        };

        let node = &mut self.nodes[index];
        node.checked = node.checked || any_on_map;
        let parent_checked = node.checked;

        // Split into color groups, preserving first-seen order.
        for entry in entries {
            node.feature_ids.push(entry.feature_id);

            let existing = node
                .groups
                .iter()
                .position(|g| g.color == entry.color);
            match existing {
                Some(index) => node.groups[index].feature_ids.push(entry.feature_id),
                None => {
                    let symbol = LegendSymbol::for_example(&entry.example, entry.color.as_ref());
                    let label = entry
                        .label
                        .clone()
                        .or_else(|| entry.color.as_ref().map(|c| c.to_string()))
                        .unwrap_or_else(|| "undefined".to_string());
                    node.groups.push(ColorGroup {
                        color: entry.color,
                        label,
                        checked: true,
                        enabled: parent_checked,
                        symbol,
                        feature_ids: vec![entry.feature_id],
                    });
                }
            }
        }
    }

    /// Parent checkbox toggle.
    pub fn set_layer_checked(
        &mut self,
        label: &str,
        checked: bool,
        map: &mut dyn MapMembership,
    ) -> bool {
        let Some(node) = self.node_mut(label) else {
            warn!(layer = label, "toggle on unknown legend node");
            return false;
        };

        node.checked = checked;
        if checked {
            for id in &node.feature_ids {
                if !map.has(*id) {
                    map.add(*id);
                }
            }
            for group in &mut node.groups {
                group.checked = true;
                group.enabled = true;
            }
        } else {
            for id in &node.feature_ids {
                map.remove(*id);
            }
            for group in &mut node.groups {
                // Checkmark stays; the row just renders disabled.
                group.enabled = false;
            }
        }
        true
    }

    /// Color sub-row toggle. Only that subset changes on the map; the
    /// parent checkbox is never touched.
    pub fn set_group_checked(
        &mut self,
        label: &str,
        color: Option<&Color>,
        checked: bool,
        map: &mut dyn MapMembership,
    ) -> bool {
        let Some(node) = self.node_mut(label) else {
            warn!(layer = label, "toggle on unknown legend node");
            return false;
        };
        let Some(group) = node.group_mut(color) else {
            warn!(layer = label, "toggle on unknown color group");
            return false;
        };

        group.checked = checked;
        if checked {
            group.enabled = true;
            for id in &group.feature_ids {
                if !map.has(*id) {
                    map.add(*id);
                }
            }
        } else {
            for id in &group.feature_ids {
                map.remove(*id);
            }
        }
        true
    }

    /// Collapse or expand a node's child list.
    pub fn toggle_expanded(&mut self, label: &str) {
        if let Some(node) = self.node_mut(label) {
            node.expanded = !node.expanded;
        }
    }

    /// Re-derive every checkbox from current map membership. The map is
    /// authoritative; the legend only caches.
    pub fn sync_with_map(&mut self, map: &dyn MapMembership) {
        for node in &mut self.nodes {
            node.checked = node.feature_ids.iter().any(|id| map.has(*id));
            for group in &mut node.groups {
                group.checked = group.feature_ids.iter().any(|id| map.has(*id));
            }
        }
    }
}
