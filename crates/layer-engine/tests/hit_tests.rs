//! Hit-tester behavior over stacked features.

use atlas_common::geojson::Feature;
use atlas_common::FeatureId;
use layer_engine::{resolve_click, HitDecision, Pane, RenderedFeature, StyleDescriptor, Symbol};
use serde_json::json;

/// A west-east line at the given latitude.
fn line_feature(
    id: u64,
    lat: f64,
    pane: Pane,
    always_clickable: bool,
    has_click_handler: bool,
) -> RenderedFeature {
    let feature: Feature = serde_json::from_value(json!({
        "type": "Feature",
        "geometry": {"type": "LineString",
                     "coordinates": [[8.999, lat], [9.001, lat]]},
        "properties": {}
    }))
    .unwrap();

    RenderedFeature {
        id: FeatureId(id),
        feature,
        symbol: Symbol::from_descriptor(StyleDescriptor::display_default(), false),
        pane,
        always_clickable,
        has_click_handler,
        hovered: false,
        tooltip: None,
    }
}

const CLICK: (f64, f64) = (9.0, 50.0);

// One degree of latitude is ~111 km; these offsets put lines 0 m, ~2 m,
// ~4 m and ~50 m from the click point.
const LAT_0M: f64 = 50.0;
const LAT_2M: f64 = 50.000018;
const LAT_4M: f64 = 50.000036;
const LAT_50M: f64 = 50.00045;

#[test]
fn test_click_goes_to_always_clickable_even_when_occluded() {
    // The topmost candidate (overlay pane) has a handler but is not
    // flagged; the protected-area polygonPane feature below it is.
    let features = vec![
        line_feature(1, LAT_0M, Pane::Overlay, false, true),
        line_feature(2, LAT_2M, Pane::Polygon, true, true),
    ];

    let decision = resolve_click(features.iter(), CLICK.0, CLICK.1);
    assert_eq!(decision, HitDecision::Feature(FeatureId(2)));
}

#[test]
fn test_topmost_flagged_candidate_wins() {
    let features = vec![
        line_feature(1, LAT_0M, Pane::Polygon, true, true),
        line_feature(2, LAT_2M, Pane::Overlay, true, true),
    ];

    let decision = resolve_click(features.iter(), CLICK.0, CLICK.1);
    assert_eq!(
        decision,
        HitDecision::Feature(FeatureId(2)),
        "higher pane z wins among flagged candidates"
    );
}

#[test]
fn test_at_most_two_candidates_survive_distance_filter() {
    // Three lines inside the tolerance; the farthest of them carries the
    // flag but must already have been dropped by the two-slot buffer.
    let features = vec![
        line_feature(1, LAT_0M, Pane::Overlay, false, true),
        line_feature(2, LAT_2M, Pane::Overlay, false, true),
        line_feature(3, LAT_4M, Pane::Overlay, true, true),
    ];

    let decision = resolve_click(features.iter(), CLICK.0, CLICK.1);
    assert_eq!(decision, HitDecision::NoInformation);
}

#[test]
fn test_far_features_are_out_of_tolerance() {
    let features = vec![line_feature(1, LAT_50M, Pane::Overlay, true, true)];
    let decision = resolve_click(features.iter(), CLICK.0, CLICK.1);
    assert_eq!(decision, HitDecision::NoInformation);
}

#[test]
fn test_no_handler_means_no_information() {
    let features = vec![line_feature(1, LAT_0M, Pane::Overlay, true, false)];
    let decision = resolve_click(features.iter(), CLICK.0, CLICK.1);
    assert_eq!(decision, HitDecision::NoInformation);
}

#[test]
fn test_markers_do_not_participate() {
    let feature: Feature = serde_json::from_value(json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [9.0, 50.0]},
        "properties": {}
    }))
    .unwrap();
    let marker = RenderedFeature {
        id: FeatureId(7),
        feature,
        symbol: Symbol::from_marker(layer_engine::MarkerSpec::Circle {
            radius: 5.0,
            color: atlas_common::Color::new("#599000"),
            fill_color: atlas_common::Color::new("#599000"),
            fill_opacity: 0.9,
            weight: 2.0,
            raise_on_add: true,
        }),
        pane: Pane::Marker,
        always_clickable: true,
        has_click_handler: true,
        hovered: false,
        tooltip: None,
    };

    let decision = resolve_click(std::iter::once(&marker), CLICK.0, CLICK.1);
    assert_eq!(decision, HitDecision::NoInformation);
}

#[test]
fn test_polygon_outlines_participate() {
    let feature: Feature = serde_json::from_value(json!({
        "type": "Feature",
        "geometry": {"type": "Polygon",
                     "coordinates": [[[8.999, 50.0], [9.001, 50.0],
                                      [9.001, 50.001], [8.999, 50.001],
                                      [8.999, 50.0]]]},
        "properties": {}
    }))
    .unwrap();
    let polygon = RenderedFeature {
        id: FeatureId(9),
        feature,
        symbol: Symbol::from_descriptor(StyleDescriptor::display_default(), true),
        pane: Pane::Polygon,
        always_clickable: true,
        has_click_handler: true,
        hovered: false,
        tooltip: None,
    };

    let decision = resolve_click(std::iter::once(&polygon), CLICK.0, CLICK.1);
    assert_eq!(decision, HitDecision::Feature(FeatureId(9)));
}
