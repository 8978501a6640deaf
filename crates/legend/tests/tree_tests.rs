//! Tests for visibility-tree state propagation.

use std::collections::HashSet;

use atlas_common::{Color, FeatureId};
use legend::{ExampleSymbol, Legend, LegendSymbol, MapMembership, RegistrationEntry};

#[derive(Default)]
struct FakeMap {
    on_map: HashSet<FeatureId>,
}

impl MapMembership for FakeMap {
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

fn line_entry(id: u64, color: &str, label: Option<&str>) -> RegistrationEntry {
    RegistrationEntry {
        feature_id: FeatureId(id),
        color: Some(Color::new(color)),
        label: label.map(|s| s.to_string()),
        example: ExampleSymbol {
            has_radius: false,
            is_polygon: false,
            fill_color: None,
        },
    }
}

fn three_color_layer(map: &mut FakeMap, on_map: bool) -> Legend {
    if on_map {
        for id in 0..6 {
            map.add(FeatureId(id));
        }
    }
    let mut legend = Legend::new();
    legend.register_layer(
        "Führungsform im Bestand",
        vec![
            line_entry(0, "#33a02c", Some("Radfahrstreifen")),
            line_entry(1, "#33a02c", Some("Radfahrstreifen")),
            line_entry(2, "#8d5a99", Some("Schutzstreifen")),
            line_entry(3, "#8d5a99", Some("Schutzstreifen")),
            line_entry(4, "#a6cee3", Some("Mischverkehr")),
            line_entry(5, "#a6cee3", Some("Mischverkehr")),
        ],
        map,
    );
    legend
}

// ============================================================================
// Row shape
// ============================================================================

#[test]
fn test_single_color_layer_renders_inline_symbol() {
    let mut map = FakeMap::default();
    map.add(FeatureId(10));
    map.add(FeatureId(11));

    let mut legend = Legend::new();
    legend.register_layer(
        "Streckenverlauf der Empfehlungsvariante",
        vec![
            line_entry(10, "#4555e4", None),
            line_entry(11, "#4555e4", None),
        ],
        &map,
    );

    let node = legend.node("Streckenverlauf der Empfehlungsvariante").unwrap();
    assert!(!node.has_sub_list(), "single color must not build a sub-list");
    assert_eq!(
        node.inline_symbol(),
        Some(&LegendSymbol::Stroke {
            color: Color::new("#4555e4")
        })
    );
    assert!(node.checked);
}

#[test]
fn test_three_color_layer_builds_collapsible_sub_list() {
    let mut map = FakeMap::default();
    let legend = three_color_layer(&mut map, true);

    let node = legend.node("Führungsform im Bestand").unwrap();
    assert!(node.has_sub_list());
    assert!(node.inline_symbol().is_none());
    assert_eq!(node.groups.len(), 3);
    assert!(node.expanded);
    assert!(node.groups.iter().all(|g| g.checked && g.enabled));
    assert_eq!(node.groups[0].label, "Radfahrstreifen");
}

#[test]
fn test_icon_layer_has_no_symbol() {
    let map = FakeMap::default();
    let mut legend = Legend::new();
    legend.register_layer(
        "Querungsformen",
        vec![RegistrationEntry {
            feature_id: FeatureId(20),
            color: None,
            label: None,
            example: ExampleSymbol {
                has_radius: false,
                is_polygon: false,
                fill_color: None,
            },
        }],
        &map,
    );

    let node = legend.node("Querungsformen").unwrap();
    assert!(!node.has_sub_list());
    assert!(
        node.inline_symbol().is_none(),
        "no stroke color means no symbol"
    );
    assert!(!node.checked, "layer not on the map starts unchecked");
}

// ============================================================================
// Propagation invariants
// ============================================================================

#[test]
fn test_parent_uncheck_removes_everything_but_keeps_child_checkmarks() {
    let mut map = FakeMap::default();
    let mut legend = three_color_layer(&mut map, true);

    legend.set_layer_checked("Führungsform im Bestand", false, &mut map);

    assert!(map.on_map.is_empty());
    let node = legend.node("Führungsform im Bestand").unwrap();
    assert!(!node.checked);
    for group in &node.groups {
        assert!(group.checked, "child checkmark must survive parent uncheck");
        assert!(!group.enabled, "child row renders disabled");
    }
}

#[test]
fn test_parent_recheck_restores_all_groups() {
    let mut map = FakeMap::default();
    let mut legend = three_color_layer(&mut map, true);

    legend.set_layer_checked("Führungsform im Bestand", false, &mut map);
    // Uncheck one group while hidden, then re-check the parent.
    legend.set_group_checked(
        "Führungsform im Bestand",
        Some(&Color::new("#8d5a99")),
        false,
        &mut map,
    );
    legend.set_layer_checked("Führungsform im Bestand", true, &mut map);

    assert_eq!(map.on_map.len(), 6, "parent check adds every color group");
    let node = legend.node("Führungsform im Bestand").unwrap();
    assert!(node.groups.iter().all(|g| g.checked && g.enabled));
}

#[test]
fn test_group_toggle_does_not_touch_parent() {
    let mut map = FakeMap::default();
    let mut legend = three_color_layer(&mut map, true);

    legend.set_group_checked(
        "Führungsform im Bestand",
        Some(&Color::new("#33a02c")),
        false,
        &mut map,
    );

    assert_eq!(map.on_map.len(), 4);
    let node = legend.node("Führungsform im Bestand").unwrap();
    assert!(node.checked, "parent state is independent of child toggles");
}

#[test]
fn test_unchecking_all_children_leaves_parent_checked() {
    let mut map = FakeMap::default();
    let mut legend = three_color_layer(&mut map, true);

    for color in ["#33a02c", "#8d5a99", "#a6cee3"] {
        legend.set_group_checked(
            "Führungsform im Bestand",
            Some(&Color::new(color)),
            false,
            &mut map,
        );
    }

    assert!(map.on_map.is_empty());
    let node = legend.node("Führungsform im Bestand").unwrap();
    assert!(
        node.checked,
        "asymmetry is intentional: empty children never propagate upward"
    );

    // An explicit re-sync against the map does reconcile it.
    legend.sync_with_map(&map);
    assert!(!legend.node("Führungsform im Bestand").unwrap().checked);
}

#[test]
fn test_groups_created_under_unchecked_parent_start_disabled() {
    let mut map = FakeMap::default();
    let legend = three_color_layer(&mut map, false);

    let node = legend.node("Führungsform im Bestand").unwrap();
    assert!(!node.checked);
    assert!(node.groups.iter().all(|g| g.checked && !g.enabled));
}

#[test]
fn test_same_label_merges_into_one_node() {
    let mut map = FakeMap::default();
    map.add(FeatureId(1));
    map.add(FeatureId(2));

    let mut legend = Legend::new();
    legend.register_layer("Querungsformen", vec![line_entry(1, "#4d4d4d", None)], &map);
    legend.register_layer("Querungsformen", vec![line_entry(2, "#ee1100", None)], &map);

    assert_eq!(legend.nodes().len(), 1);
    let node = legend.node("Querungsformen").unwrap();
    assert_eq!(node.feature_ids().len(), 2);
}
