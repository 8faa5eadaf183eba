use quakemap::compose::OVERLAY_LAYER_ID;
use quakemap::prelude::*;

const WEEK: &str = r#"{
    "type": "FeatureCollection",
    "metadata": {"generated": 1700000100000, "title": "USGS All Earthquakes, Past Week", "count": 4},
    "features": [
        {"type": "Feature", "id": "ci1",
         "properties": {"mag": 4.5, "place": "1km SSE of Example, CA", "time": 1700000000000},
         "geometry": {"type": "Point", "coordinates": [-120.5, 37.0, 12.3]}},
        {"type": "Feature", "id": "us2",
         "properties": {"mag": 5.1, "place": "Tonga", "time": 1700000000000},
         "geometry": {"type": "Point", "coordinates": [-175.0, -20.0, 95.0]}},
        {"type": "Feature", "id": "hv3",
         "properties": {"mag": 0.0, "place": "Hawaii", "time": 0},
         "geometry": {"type": "Point", "coordinates": [-155.0, 19.4, -1.5]}},
        {"type": "Feature", "id": "ak4",
         "properties": {"mag": -0.4, "place": "Alaska", "time": 1699999999999},
         "geometry": {"type": "Point", "coordinates": [-150.0, 61.0, 45.0]}}
    ]
}"#;

fn container() -> MapContainer {
    MapContainer::new("map", Point::new(1200.0, 800.0))
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_week_feed_becomes_markers_in_feed_order() {
        let source = StaticFeedSource::new(WEEK);
        let map = load_earthquake_map(&QuakeMapConfig::default(), &source, &container())
            .await
            .unwrap();

        let overlay = map.overlay(OVERLAY_LAYER_ID).unwrap();
        assert_eq!(overlay.len(), 4);

        let titles: Vec<&str> = overlay
            .markers()
            .iter()
            .map(|m| m.popup().unwrap().title.as_str())
            .collect();
        assert_eq!(titles, vec!["1km SSE of Example, CA", "Tonga", "Hawaii", "Alaska"]);

        let first = &overlay.markers()[0];
        assert_eq!(first.position(), LatLng::new(37.0, -120.5));
        assert_eq!(first.radius(), 22.5);
        assert_eq!(first.fill_color().to_hex(), "#eef131");
        assert_eq!(first.stroke_color().to_hex(), "#800080");
        assert_eq!(first.stroke_weight(), 0.7);
        assert_eq!(first.fill_opacity(), 0.7);

        let colors: Vec<String> = overlay
            .markers()
            .iter()
            .map(|m| m.fill_color().to_hex())
            .collect();
        assert_eq!(colors, vec!["#eef131", "#d10000", "#0feb2d", "#f7ca04"]);
    }

    #[tokio::test]
    async fn test_zero_and_negative_magnitudes_are_kept() {
        let source = StaticFeedSource::new(WEEK);
        let map = load_earthquake_map(&QuakeMapConfig::default(), &source, &container())
            .await
            .unwrap();

        let overlay = map.overlay(OVERLAY_LAYER_ID).unwrap();
        assert_eq!(overlay.markers()[2].radius(), 0.0);
        assert_eq!(overlay.markers()[3].radius(), -2.0);
        assert!(!overlay.markers()[3].is_drawable());
    }

    #[tokio::test]
    async fn test_popup_text() {
        let source = StaticFeedSource::new(WEEK);
        let map = load_earthquake_map(&QuakeMapConfig::default(), &source, &container())
            .await
            .unwrap();

        let popup = map.overlay(OVERLAY_LAYER_ID).unwrap().markers()[2]
            .popup()
            .unwrap()
            .to_html();
        assert_eq!(
            popup,
            "<h3>Hawaii</h3><hr><p>Thu Jan 01 1970 00:00:00 GMT+0000 (Coordinated Universal Time)</p>\
             <hr><p>Magnitude: 0</p><hr><p>Depth: -1.5</p>"
        );
    }

    #[tokio::test]
    async fn test_empty_feed_still_composes() {
        let source = StaticFeedSource::new(r#"{"type": "FeatureCollection", "features": []}"#);
        let map = load_earthquake_map(&QuakeMapConfig::default(), &source, &container())
            .await
            .unwrap();

        assert!(map.overlay(OVERLAY_LAYER_ID).unwrap().is_empty());
        assert_eq!(map.list_layers().len(), 3);
        assert!(map.controls().legend().is_some());
        assert!(map.controls().layers_control().is_some());
    }

    #[tokio::test]
    async fn test_missing_container_produces_no_map() {
        let source = StaticFeedSource::new(WEEK);
        let elsewhere = MapContainer::new("not-the-map", Point::new(10.0, 10.0));
        let result = load_earthquake_map(&QuakeMapConfig::default(), &source, &elsewhere).await;
        assert!(matches!(result, Err(MapError::ContainerNotFound(_))));
    }

    #[tokio::test]
    async fn test_null_magnitude_keeps_the_rest_of_the_feed() {
        let source = StaticFeedSource::new(
            r#"{"features": [
                {"properties": {"mag": 4.5, "place": "1km SSE of Example, CA", "time": 1700000000000},
                 "geometry": {"coordinates": [-120.5, 37.0, 12.3]}},
                {"properties": {"mag": null, "place": "pending review", "time": 1700000000000},
                 "geometry": {"coordinates": [-118.0, 34.0, 3.0]}}
            ]}"#,
        );
        let map = load_earthquake_map(&QuakeMapConfig::default(), &source, &container())
            .await
            .unwrap();

        let overlay = map.overlay(OVERLAY_LAYER_ID).unwrap();
        assert_eq!(overlay.len(), 2);
        assert_eq!(overlay.markers()[0].radius(), 22.5);

        let pending = &overlay.markers()[1];
        assert_eq!(pending.radius(), 0.0);
        assert!(pending.popup().unwrap().to_html().contains("<p>Magnitude: null</p>"));
    }

    #[tokio::test]
    async fn test_feature_without_depth_fails_the_feed() {
        let source = StaticFeedSource::new(
            r#"{"features": [{"properties": {"mag": 1.0, "place": "x", "time": 1},
                "geometry": {"coordinates": [1.0, 2.0]}}]}"#,
        );
        let result = load_earthquake_map(&QuakeMapConfig::default(), &source, &container()).await;
        assert!(matches!(result, Err(MapError::Decode(_))));
    }
}

#[cfg(test)]
mod interaction_tests {
    use super::*;

    fn centered_map() -> Map {
        let config = QuakeMapConfig::default();
        let markers = FeatureTransformer::default().transform_all(&[EarthquakeFeature::new(
            "Kansas",
            1_700_000_000_000,
            3.0,
            [config.center.lng, config.center.lat, 5.0],
        )]);
        compose(&config, markers, &container()).unwrap()
    }

    #[test]
    fn test_click_opens_and_closes_popup() {
        let mut map = centered_map();
        let center = map.viewport().lat_lng_to_pixel(&map.viewport().center);

        let popup = map.click(&center).unwrap();
        assert_eq!(popup.content.title, "Kansas");
        assert_eq!(popup.layer_id, OVERLAY_LAYER_ID);

        map.click(&Point::new(5.0, 5.0));
        assert!(map.popup().is_none());
    }

    #[test]
    fn test_hidden_overlay_is_not_clickable() {
        let mut map = centered_map();
        let center = map.viewport().lat_lng_to_pixel(&map.viewport().center);

        map.apply_layer_action(LayerAction::ToggleOverlay {
            id: OVERLAY_LAYER_ID.to_string(),
            visible: false,
        })
        .unwrap();
        assert!(map.click(&center).is_none());

        map.toggle_overlay(OVERLAY_LAYER_ID, true).unwrap();
        assert!(map.click(&center).is_some());
    }

    #[test]
    fn test_base_layers_are_exclusive() {
        let mut map = centered_map();
        map.apply_layer_action(LayerAction::SelectBase("topo".to_string()))
            .unwrap();

        let visible: Vec<&str> = map
            .base_layers()
            .into_iter()
            .filter(|l| l.is_visible())
            .map(|l| l.id())
            .collect();
        assert_eq!(visible, vec!["topo"]);

        assert!(map.select_base_layer(OVERLAY_LAYER_ID).is_err());
        assert_eq!(map.active_base_layer().map(|l| l.id()), Some("topo"));
    }

    #[test]
    fn test_legend_lists_depth_buckets_in_order() {
        let map = centered_map();
        let legend = map.controls().legend().unwrap();

        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["-10-10", "10-30", "30-50", "50-70", "70-90", "90+"]);
        assert_eq!(legend.position, ControlPosition::BottomRight);
        assert!(legend.to_html().starts_with("<h1>Depth<br />color<br />scale</h1><ul>"));
    }
}
