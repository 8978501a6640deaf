//! Map-session behavior: legend toggles, zoom rescaling, click routing.

use atlas_common::{Color, FilePayload, ProjectConfig};
use layer_engine::{
    ClickOutcome, LayerCollectionBuilder, PopupRouting, Sidebar, Symbol, FURTHER_INFO_PANEL,
};
use serde_json::json;

#[derive(Default)]
struct SpySidebar {
    opened: Vec<String>,
}

impl Sidebar for SpySidebar {
    fn open(&mut self, panel_id: &str) {
        self.opened.push(panel_id.to_string());
    }
    fn close(&mut self) {}
}

fn payload(name: &str, data: serde_json::Value) -> FilePayload {
    FilePayload {
        name: name.to_string(),
        mime_type: "application/json".to_string(),
        data,
    }
}

fn inventory_collection() -> serde_json::Value {
    // Two codes, two stroke colors -> a two-group legend node.
    json!({
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}},
        "features": [
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[8.999, 50.0], [9.001, 50.0]]},
             "properties": {"Bestand": 1, "ID": 1}},
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[8.999, 50.002], [9.001, 50.002]]},
             "properties": {"Bestand": 2, "ID": 2}}
        ]
    })
}

fn configured_builder() -> LayerCollectionBuilder {
    let config = ProjectConfig::from_yaml(
        r#"
layer_settings:
  "Fuehrungsform_A":
    always_keep_clickable: true
properties_to_exclude:
  "Fuehrungsform_A": ["user"]
"#,
    )
    .unwrap();
    LayerCollectionBuilder::new(config)
}

// ============================================================================
// Legend <-> map consistency
// ============================================================================

#[test]
fn test_color_group_toggle_removes_subset_only() {
    let mut session = configured_builder()
        .build_from_payloads(vec![payload("Fuehrungsform_A.geojson", inventory_collection())], Vec::new());

    assert_eq!(session.rendered_count(), 2);

    session.set_color_group_visible(
        "Führungsform im Bestand",
        Some(&Color::new("#33a02c")),
        false,
    );
    assert_eq!(session.rendered_count(), 1);
    assert!(
        session.legend().node("Führungsform im Bestand").unwrap().checked,
        "parent stays checked after a child toggle"
    );

    session.set_layer_visible("Führungsform im Bestand", false);
    assert_eq!(session.rendered_count(), 0);

    session.set_layer_visible("Führungsform im Bestand", true);
    assert_eq!(session.rendered_count(), 2, "parent re-check restores every group");
}

// ============================================================================
// Zoom scaling
// ============================================================================

#[test]
fn test_zoom_rescaling_is_idempotent_at_session_level() {
    let mut session = configured_builder()
        .build_from_payloads(vec![payload("Fuehrungsform_A.geojson", inventory_collection())], Vec::new());

    session.on_zoom(17.0);
    let weight_once = match &session.layers()[0].features[0].symbol {
        Symbol::Line(v) => v.weight,
        other => panic!("expected line, got {:?}", other),
    };

    session.on_zoom(17.0);
    session.on_zoom(17.0);
    let weight_thrice = match &session.layers()[0].features[0].symbol {
        Symbol::Line(v) => v.weight,
        other => panic!("expected line, got {:?}", other),
    };

    assert_eq!(weight_once, weight_thrice);
}

#[test]
fn test_hover_enlarges_and_restores() {
    let mut session = configured_builder()
        .build_from_payloads(vec![payload("Fuehrungsform_A.geojson", inventory_collection())], Vec::new());

    let id = session.layers()[0].features[0].id;
    let base = match &session.layers()[0].features[0].symbol {
        Symbol::Line(v) => v.weight,
        _ => unreachable!(),
    };

    session.set_hovered(id, true);
    let hovered = match &session.layers()[0].features[0].symbol {
        Symbol::Line(v) => v.weight,
        _ => unreachable!(),
    };
    assert!((hovered - base * 1.25).abs() < 1e-12);

    // Repeated enter events do not compound.
    session.set_hovered(id, true);
    session.set_hovered(id, false);
    let restored = match &session.layers()[0].features[0].symbol {
        Symbol::Line(v) => v.weight,
        _ => unreachable!(),
    };
    assert!((restored - base).abs() < 1e-12);
}

// ============================================================================
// Click dispatch
// ============================================================================

#[test]
fn test_click_routes_rows_to_sidebar_panel() {
    let session = configured_builder()
        .build_from_payloads(vec![payload("Fuehrungsform_A.geojson", inventory_collection())], Vec::new());
    let mut sidebar = SpySidebar::default();

    let outcome = session.handle_click(9.0, 50.0, &mut sidebar);
    match outcome {
        ClickOutcome::Dispatched { content, routing, .. } => {
            assert_eq!(routing, PopupRouting::SidebarPanel);
            assert!(content.rows.iter().any(|r| r.name == "Bestand"));
        }
        other => panic!("expected dispatch, got {:?}", other),
    }
    assert_eq!(sidebar.opened, vec![FURTHER_INFO_PANEL.to_string()]);
}

#[test]
fn test_click_on_empty_map_yields_no_information() {
    let mut session = configured_builder()
        .build_from_payloads(vec![payload("Fuehrungsform_A.geojson", inventory_collection())], Vec::new());
    session.set_layer_visible("Führungsform im Bestand", false);

    let mut sidebar = SpySidebar::default();
    let outcome = session.handle_click(9.0, 50.0, &mut sidebar);
    assert!(matches!(outcome, ClickOutcome::NoInformation));
    assert!(sidebar.opened.is_empty());
}

#[test]
fn test_hidden_features_do_not_receive_clicks() {
    let mut session = configured_builder()
        .build_from_payloads(vec![payload("Fuehrungsform_A.geojson", inventory_collection())], Vec::new());

    // Hide the green group; a click on its line must not reach it.
    session.set_color_group_visible(
        "Führungsform im Bestand",
        Some(&Color::new("#33a02c")),
        false,
    );
    let mut sidebar = SpySidebar::default();
    let outcome = session.handle_click(9.0, 50.0, &mut sidebar);
    assert!(matches!(outcome, ClickOutcome::NoInformation));
}
