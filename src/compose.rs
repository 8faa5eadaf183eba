//! Map composition and the fetch → transform → compose pipeline

use crate::{
    core::{
        config::QuakeMapConfig,
        map::{Map, MapContainer, MapOptions},
    },
    feed::{fetch_feed, FeedSource},
    layers::{base::LayerTrait, marker::CircleMarker, marker::MarkerLayer, tile::TileLayer},
    transform::FeatureTransformer,
    ui::{
        controls::{ControlManager, LayerEntry, LayersControl},
        legend::Legend,
    },
    Result,
};

/// Layer id of the earthquake overlay
pub const OVERLAY_LAYER_ID: &str = "earthquakes";

/// Assembles the map: both base layers (street shown, topo hidden), the
/// earthquake overlay, an expanded layers control and the depth legend,
/// centered on the configured view
pub fn compose(
    config: &QuakeMapConfig,
    markers: Vec<CircleMarker>,
    container: &MapContainer,
) -> Result<Map> {
    let mut map = Map::mount(
        container,
        &config.container_id,
        config.center,
        config.zoom,
        MapOptions::default(),
    )?;

    let mut base_entries = Vec::new();
    for (index, layer_config) in config.base_layers().into_iter().enumerate() {
        let mut layer = TileLayer::new(layer_config.clone());
        layer.set_z_index(index as i32);
        // the first base layer is shown on load
        layer.set_visible(index == 0);
        base_entries.push(LayerEntry::new(layer.id(), layer.name()));
        map.add_layer(Box::new(layer))?;
    }

    let marker_count = markers.len();
    let overlay = MarkerLayer::new(OVERLAY_LAYER_ID, config.overlay_name.clone(), markers);
    let overlay_entry = LayerEntry::new(overlay.id(), overlay.name());
    map.add_layer(Box::new(overlay))?;

    let layers_control = LayersControl::new(base_entries, vec![overlay_entry]).with_collapsed(false);
    let legend = Legend::from_scale(config.legend_title.clone(), &config.depth_scale);
    map.set_controls(
        ControlManager::new()
            .with_layers_control(layers_control)
            .with_legend(legend),
    );

    log::info!(
        "composed map in '{}' with {} earthquake markers",
        map.container_id(),
        marker_count
    );
    for layer in map.layers() {
        log::debug!("layer {}", layer.options());
    }

    Ok(map)
}

/// Fetches the feed once, transforms every feature and composes the map.
/// Any failure is returned and no map is produced.
pub async fn load_earthquake_map(
    config: &QuakeMapConfig,
    source: &dyn FeedSource,
    container: &MapContainer,
) -> Result<Map> {
    let feed = fetch_feed(source).await?;

    let transformer = FeatureTransformer::new(config.marker.clone(), config.depth_scale.clone());
    let markers = transformer.transform_all(&feed.features);

    compose(config, markers, container)
}
