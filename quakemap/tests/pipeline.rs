mod common;

use approx::assert_abs_diff_eq;
use chrono::Utc;
use common::{feed_with, quake, RecordingCanvas};
use quakemap::feed::parse_feed;
use quakemap::geo::Size;
use quakemap::layer::MarkerLayer;
use quakemap::legend::DepthLegend;
use quakemap::marker::build_marker_layer_in;
use quakemap::{compose_map, earthquake_map, Map};

fn markers_of(map: &Map) -> &MarkerLayer {
    map.layers()[2]
        .as_any()
        .downcast_ref::<MarkerLayer>()
        .expect("third layer is the marker overlay")
}

#[test]
fn single_feature_end_to_end() {
    let text = feed_with(vec![quake(
        5.0,
        -100.0,
        40.0,
        45.0,
        "10km NE of Testville",
        1_700_000_000_000,
    )]);

    let features = parse_feed(&text).unwrap();
    let mut map = compose_map(build_marker_layer_in(&features, &Utc));

    let markers = markers_of(&map);
    assert_eq!(markers.len(), 1);
    let marker = &markers.markers()[0];
    assert_eq!(marker.radius(), 25.0);
    assert_eq!(marker.fill_color().to_hex(), "#FC4E2A");
    assert_eq!(
        marker.popup().to_html(),
        "<h3>10km NE of Testville</h3><hr><p>Tue Nov 14 2023 22:13:20 GMT+0000</p>"
    );

    map.set_size(Size::new(800.0, 600.0));
    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    map.render(&mut canvas);

    // Tiles are not loaded yet, only the marker is drawn.
    assert!(canvas.images.is_empty());
    assert_eq!(canvas.circles.len(), 1);
    let circle = &canvas.circles[0];
    assert_eq!(circle.radius, 25.0);
    assert!(circle.center.x < 400.0 && circle.center.y < 300.0);

    let clicked = map.marker_at(&circle.center).unwrap();
    assert_eq!(clicked.popup().title(), "10km NE of Testville");
}

#[test]
fn local_time_popup() {
    let text = feed_with(vec![quake(1.0, 0.0, 0.0, 1.0, "Somewhere", 1_700_000_000_000)]);
    let map = earthquake_map(&parse_feed(&text).unwrap());

    let popup = markers_of(&map).markers()[0].popup().to_html();
    assert!(popup.starts_with("<h3>Somewhere</h3><hr><p>"));
    assert!(popup.contains("Nov 1"));
    assert!(popup.contains("2023"));
    assert!(popup.contains("GMT"));
}

#[test]
fn markers_follow_feed_order() {
    let features: Vec<_> = (0..25)
        .map(|i| {
            quake(
                i as f64 / 4.0,
                -95.0 + i as f64 * 0.1,
                37.0,
                i as f64 * 5.0 - 15.0,
                &format!("quake {i}"),
                1_700_000_000_000 + i,
            )
        })
        .collect();

    let map = earthquake_map(&parse_feed(&feed_with(features)).unwrap());
    let markers = markers_of(&map);
    assert_eq!(markers.len(), 25);

    for (i, marker) in markers.markers().iter().enumerate() {
        assert_eq!(marker.popup().title(), format!("quake {i}"));
        assert_abs_diff_eq!(marker.radius(), i as f64 / 4.0 * 5.0, epsilon = 1e-12);
        assert_eq!(
            marker.fill_color(),
            quakemap::style::color_of_depth(i as f64 * 5.0 - 15.0)
        );
    }
}

#[test]
fn empty_feed_still_shows_the_map() {
    let map = earthquake_map(&parse_feed(&feed_with(vec![])).unwrap());

    assert_eq!(map.layers().len(), 3);
    assert!(markers_of(&map).is_empty());
    assert_eq!(map.legend().unwrap().entries().len(), 6);

    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    map.render(&mut canvas);
    assert!(canvas.circles.is_empty());
}

#[test]
fn hidden_overlay_is_not_drawn() {
    let text = feed_with(vec![quake(3.0, -95.71, 37.09, 5.0, "Center", 0)]);
    let mut map = earthquake_map(&parse_feed(&text).unwrap());
    map.set_size(Size::new(800.0, 600.0));

    map.set_overlay_visible(0, false);
    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    map.render(&mut canvas);
    assert!(canvas.circles.is_empty());
    assert!(map.marker_at(&quakemap::geo::Point2::new(400.0, 300.0)).is_none());

    map.set_overlay_visible(0, true);
    map.render(&mut canvas);
    assert_eq!(canvas.circles.len(), 1);
    assert_abs_diff_eq!(canvas.circles[0].center.x, 400.0, epsilon = 1e-6);
    assert_abs_diff_eq!(canvas.circles[0].center.y, 300.0, epsilon = 1e-6);
}

#[test]
fn legend_matches_markers() {
    let legend = DepthLegend::new();
    let labels: Vec<_> = legend.entries().iter().map(|e| e.label()).collect();
    assert_eq!(
        labels,
        ["-10–10 km", "10–30 km", "30–50 km", "50–70 km", "70–90 km", "90+ km"]
    );

    let colors: Vec<_> = legend.entries().iter().map(|e| e.color.to_hex()).collect();
    assert_eq!(
        colors,
        ["#FFEDA0", "#FEB24C", "#FD8D3C", "#FC4E2A", "#E31A1C", "#BD0026"]
    );

    let html = legend.to_html();
    assert_eq!(html.matches("<br>").count(), 6);
    assert!(html.contains("90+ km"));
}

#[test]
fn hidden_overlay_hides_its_markers() {
    let text = feed_with(vec![quake(4.0, -95.71, 37.09, 20.0, "Center", 0)]);
    let mut map = earthquake_map(&parse_feed(&text).unwrap());
    let marker = markers_of(&map).markers()[0].clone();

    assert!(map.is_marker_visible(&marker));

    map.set_overlay_visible(0, false);
    assert!(!map.is_marker_visible(&marker));

    map.select_base_layer(1);
    map.set_overlay_visible(0, true);
    assert!(map.is_marker_visible(&marker));
}
