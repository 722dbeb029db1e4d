use approx::assert_abs_diff_eq;
use assert_matches::assert_matches;
use geolayer::error::GeoJsonError;
use geolayer::geolayer_types::{Geom, GeometryError, Position, ShapeKind};
use geolayer::json::{self, JsonValue};
use geolayer::pipeline::GeoJsonParser;
use geolayer::surface::{LayerCollection, MapSurface};
use geolayer::{parse, Color, GeoJsonLayer, Style};
use insta::{assert_compact_debug_snapshot, assert_snapshot};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const SEATTLE: &str = r#"{"type":"Point","coordinates":[-122.265185,47.609466]}"#;
const POLYGON: &str =
    r#"{"type":"Polygon","coordinates":[[[30,10],[40,40],[20,40],[10,20],[30,10]]]}"#;
const BROKEN_POLYGON: &str = r#"{"type":"Polygon","coordinates":[[[35,10],[9,8]]]}"#;

#[test]
fn point_with_default_style() {
    init_logger();

    let layer = parse(SEATTLE).unwrap();
    assert_eq!(layer.len(), 1);
    assert_eq!(
        layer.features()[0].geometry(),
        &Geom::Point(Position::new(-122.265185, 47.609466).unwrap())
    );
    assert_eq!(layer.style(), &Style::default());
    assert_eq!(layer.style().stroke_color(), Color::BLACK);
    assert_eq!(layer.style().stroke_width(), 1.0);
}

#[test]
fn styled_polygon() {
    init_logger();

    let layer = GeoJsonParser::new()
        .with_style(
            Style::default()
                .with_stroke_color(Color::GREEN)
                .with_fill_color(Color::ORANGE),
        )
        .parse(POLYGON)
        .unwrap();

    assert_eq!(layer.len(), 1);
    let Geom::Polygon(polygon) = layer.features()[0].geometry() else {
        panic!("expected a polygon");
    };
    let ring = polygon.exterior();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.first(), ring.last());
    assert_abs_diff_eq!(ring[1], Position::new(40.0, 40.0).unwrap());

    assert_eq!(layer.style().stroke_color(), Color::GREEN);
    assert_eq!(layer.style().fill_color(), Color::ORANGE);
}

#[test]
fn broken_polygon_is_rejected() {
    init_logger();

    let result = parse(BROKEN_POLYGON);
    assert_matches!(
        result,
        Err(GeoJsonError::Geometry(GeometryError::UnclosedRing { .. }))
    );
    assert_snapshot!(
        result.unwrap_err(),
        @"invalid geometry: linear ring is not closed: first position [35, 10] differs from last position [9, 8]"
    );

    let result = GeoJsonParser::new()
        .with_auto_close_rings(true)
        .parse(BROKEN_POLYGON);
    assert_compact_debug_snapshot!(result, @"Err(Geometry(DegenerateRing { len: 3 }))");
}

#[test]
fn auto_closed_ring() {
    let text = r#"{"type":"Polygon","coordinates":[[[30,10],[40,40],[20,40],[10,20]]]}"#;
    assert_matches!(
        parse(text),
        Err(GeoJsonError::Geometry(GeometryError::UnclosedRing { .. }))
    );

    let layer = GeoJsonParser::new()
        .with_auto_close_rings(true)
        .parse(text)
        .unwrap();
    let Geom::Polygon(polygon) = layer.features()[0].geometry() else {
        panic!("expected a polygon");
    };
    assert_eq!(polygon.exterior().first(), polygon.exterior().last());
    assert_eq!(polygon.exterior().len(), 5);
}

#[test]
fn unknown_type_is_a_schema_error() {
    for text in [
        r#"{"type": "Circle", "coordinates": [1, 2]}"#,
        r#"{"type": "Topology"}"#,
        r#"{"type": null}"#,
        r#"{}"#,
        "42",
    ] {
        assert_matches!(parse(text), Err(GeoJsonError::Schema(_)), "{text}");
    }

    assert_snapshot!(
        parse(r#"{"type": "Circle"}"#).unwrap_err(),
        @r#"invalid GeoJSON at $.type: unknown GeoJSON type "Circle""#
    );
}

#[test]
fn syntax_errors() {
    assert_snapshot!(
        parse(r#"{"type": }"#).unwrap_err(),
        @"invalid JSON at byte 9: unexpected character '}', expected a JSON value"
    );
    assert_matches!(parse(""), Err(GeoJsonError::Syntax(e)) if e.offset == 0);
    assert_matches!(
        parse(&format!("{SEATTLE} x")),
        Err(GeoJsonError::Syntax(_))
    );
}

#[test]
fn schema_error_paths() {
    let text = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": null, "properties": null},
        {"type": "Feature", "properties": null, "geometry": {"type": "LineString", "coordinates": [[1, 2], [3]]}}
    ]}"#;

    assert_matches!(
        parse(text),
        Err(GeoJsonError::Schema(e)) if e.path == "$.features[1].geometry.coordinates[1]"
    );
}

#[test]
fn out_of_range_positions() {
    assert_matches!(
        parse(r#"{"type":"Point","coordinates":[200,10]}"#),
        Err(GeoJsonError::Geometry(GeometryError::OutOfRange { longitude, .. }))
            if longitude == 200.0
    );
    assert_matches!(
        parse(r#"{"type":"Point","coordinates":[10,-91]}"#),
        Err(GeoJsonError::Geometry(GeometryError::OutOfRange { .. }))
    );
}

#[test]
fn line_string_length() {
    assert_compact_debug_snapshot!(
        parse(r#"{"type":"LineString","coordinates":[[1,2]]}"#),
        @"Err(Geometry(DegenerateLine { len: 1 }))"
    );

    let layer = parse(r#"{"type":"LineString","coordinates":[[1,2],[3,4],[5,6]]}"#).unwrap();
    assert_eq!(layer.features()[0].shape_kind(), Some(ShapeKind::Line));
}

#[test]
fn forbidden_members_are_rejected() {
    assert_matches!(
        parse(r#"{"type":"Point","coordinates":[1,2],"properties":{}}"#),
        Err(GeoJsonError::Schema(e)) if e.path == "$.properties"
    );
    assert_matches!(
        parse(r#"{"type":"Feature","geometry":null,"properties":null,"coordinates":[1,2]}"#),
        Err(GeoJsonError::Schema(_))
    );
}

#[test]
fn mixed_altitudes_are_dropped() {
    init_logger();

    let text = r#"{"type":"LineString","coordinates":[[1,2,10],[3,4,20],[5,6]]}"#;
    let layer = parse(text).unwrap();
    assert!(layer.features()[0]
        .geometry()
        .iter_points()
        .all(|p| p.alt().is_none()));

    let layer = parse(r#"{"type":"LineString","coordinates":[[1,2,10],[3,4,20]]}"#).unwrap();
    assert_eq!(
        layer.features()[0]
            .geometry()
            .iter_points()
            .filter_map(|p| p.alt())
            .collect::<Vec<_>>(),
        [10.0, 20.0]
    );
}

#[test]
fn deep_nesting_is_limited() {
    let deep = format!("{}{}", "[".repeat(300), "]".repeat(300));
    assert_matches!(
        parse(&deep),
        Err(GeoJsonError::Syntax(e)) if e.reason.contains("nesting depth")
    );

    assert!(GeoJsonParser::new()
        .with_max_depth(1000)
        .parse(&deep)
        .is_err_and(|e| matches!(e, GeoJsonError::Schema(_))));
}

#[test]
fn feature_collection_to_surface() {
    init_logger();

    let text = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "seattle", "properties": {"name": "Seattle", "population": 737015},
             "geometry": {"type": "Point", "coordinates": [-122.33, 47.61]}},
            {"type": "Feature", "id": 2, "properties": {"name": "Route"},
             "geometry": {"type": "LineString", "coordinates": [[-122.33, 47.61], [-122.68, 45.52]]}},
            {"type": "Feature", "properties": null, "geometry": null},
            {"type": "Feature", "properties": {"name": "Area"},
             "geometry": {"type": "Polygon", "coordinates": [[[-123, 45], [-121, 45], [-121, 48], [-123, 45]]]}}
        ]
    }"#;

    let layer: GeoJsonLayer = text.parse().unwrap();
    assert_eq!(layer.len(), 3);

    let first = &layer.features()[0];
    assert_eq!(first.id(), Some(&JsonValue::String("seattle".into())));
    assert_eq!(
        first.properties().get("population").and_then(JsonValue::as_f64),
        Some(737015.0)
    );
    assert_eq!(layer.features()[1].id(), Some(&JsonValue::Number(2.0)));

    let rect = layer.bounding_rect().unwrap();
    assert_abs_diff_eq!(rect.x_min, -123.0);
    assert_abs_diff_eq!(rect.y_max, 48.0);

    let mut surface = LayerCollection::default();
    let id = surface.add_layer(layer);
    surface.layer_mut(id).unwrap().set_lines_visible(false);
    assert_eq!(surface.layer(id).unwrap().visible_features().count(), 2);

    let removed = surface.layer_mut(id).unwrap().remove_polygons();
    assert_eq!(removed.len(), 1);

    let layer = surface.remove_layer(id).unwrap();
    assert_eq!(layer.len(), 2);
    assert!(surface.is_empty());
}

#[test]
fn style_from_json_config() {
    let style: Style = serde_json::from_str(
        r##"{"stroke_color": "#00FF00", "fill_color": "#FFA500FF", "stroke_width": 2.5, "stroke_dashed": true}"##,
    )
    .unwrap();

    let layer = GeoJsonParser::new()
        .with_style(style)
        .parse(POLYGON)
        .unwrap();
    assert_eq!(layer.style().stroke_color(), Color::GREEN);
    assert_eq!(layer.style().fill_color(), Color::ORANGE);
    assert_eq!(layer.style().stroke_width(), 2.5);
    assert!(layer.style().stroke_dashed());

    assert!(serde_json::from_str::<Style>(r#"{"stroke_color": "green"}"#).is_err());
}

fn same_value(ours: &JsonValue, reference: &serde_json::Value) -> bool {
    match (ours, reference) {
        (JsonValue::Null, serde_json::Value::Null) => true,
        (JsonValue::Bool(a), serde_json::Value::Bool(b)) => a == b,
        (JsonValue::Number(a), serde_json::Value::Number(b)) => b.as_f64() == Some(*a),
        (JsonValue::String(a), serde_json::Value::String(b)) => a == b,
        (JsonValue::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(a, b))
        }
        (JsonValue::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, value)| b.get(key).is_some_and(|v| same_value(value, v)))
        }
        _ => false,
    }
}

#[test]
fn json_parser_agrees_with_serde_json() {
    let documents = [
        SEATTLE,
        POLYGON,
        r#"{"a": [1, -2.5, 3e2, 0.125E-2, -0], "b": {"c": null, "d": [true, false]}, "e": ""}"#,
        r#"["\"quoted\"", "tab\tnew\nline", "\u00e9\u4E2D", "\ud83d\ude00", "back\\slash\/"]"#,
        r#"  {"nested": [[[[[]]]], {}], "unicode": "Zürich"}  "#,
        "-0.0000001",
    ];

    for text in documents {
        let ours = json::parse(text).unwrap();
        let reference: serde_json::Value = serde_json::from_str(text).unwrap();
        assert!(same_value(&ours, &reference), "{text}");
    }

    for text in ["[1,]", "{\"a\" 1}", "01", "[1.]", "\"\\x\"", "tru", "{,}", "[\"\u{1}\"]"] {
        assert!(json::parse(text).is_err(), "{text}");
        assert!(serde_json::from_str::<serde_json::Value>(text).is_err(), "{text}");
    }
}
