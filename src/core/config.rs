//! Immutable configuration for the earthquake map
//!
//! Every parameter of the pipeline (feed location, initial view, tile
//! providers, marker styling, depth color scale) lives here so it can be
//! passed explicitly to the fetcher, transformer and composer. The
//! `Default` implementation reproduces the fixed constants in
//! [`crate::core::constants`].

use crate::core::constants::*;
use crate::core::geo::LatLng;
use crate::style::{color::Color, depth::DepthScale};
use serde::{Deserialize, Serialize};

/// Configuration of one base tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    /// Layer id used by the map and the layers control
    pub id: String,
    /// Display name in the layers control
    pub name: String,
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Subdomains substituted for `{s}`
    pub subdomains: Vec<String>,
    /// Attribution text (HTML) required by the provider
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl TileLayerConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url_template: url_template.into(),
            subdomains: TILE_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            attribution: attribution.into(),
            min_zoom: 0,
            max_zoom: 18,
        }
    }

    /// OpenStreetMap standard tiles
    pub fn street() -> Self {
        Self::new("street", STREET_LAYER_NAME, STREET_TILE_URL, STREET_ATTRIBUTION)
    }

    /// OpenTopoMap tiles
    pub fn topographic() -> Self {
        let mut config = Self::new("topo", TOPO_LAYER_NAME, TOPO_TILE_URL, TOPO_ATTRIBUTION);
        config.max_zoom = 17;
        config
    }
}

/// Constant styling shared by every circle marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Radius in pixels per unit of magnitude
    pub radius_scale: f64,
    pub stroke_color: Color,
    pub stroke_weight: f32,
    pub fill_opacity: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius_scale: MAGNITUDE_RADIUS_SCALE,
            stroke_color: Color::PURPLE,
            stroke_weight: MARKER_STROKE_WEIGHT,
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }
}

/// Top-level configuration of the earthquake map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeMapConfig {
    pub feed_url: String,
    pub container_id: String,
    pub center: LatLng,
    pub zoom: f64,
    pub street: TileLayerConfig,
    pub topo: TileLayerConfig,
    pub overlay_name: String,
    pub marker: MarkerStyle,
    pub depth_scale: DepthScale,
    pub legend_title: String,
}

impl Default for QuakeMapConfig {
    fn default() -> Self {
        Self {
            feed_url: FEED_URL.to_string(),
            container_id: MAP_CONTAINER_ID.to_string(),
            center: LatLng::from(DEFAULT_CENTER),
            zoom: DEFAULT_ZOOM,
            street: TileLayerConfig::street(),
            topo: TileLayerConfig::topographic(),
            overlay_name: OVERLAY_LAYER_NAME.to_string(),
            marker: MarkerStyle::default(),
            depth_scale: DepthScale::default(),
            legend_title: LEGEND_TITLE.to_string(),
        }
    }
}

impl QuakeMapConfig {
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    pub fn with_view(mut self, center: LatLng, zoom: f64) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    pub fn with_marker_style(mut self, marker: MarkerStyle) -> Self {
        self.marker = marker;
        self
    }

    /// Base layers in the order they appear in the layers control
    pub fn base_layers(&self) -> [&TileLayerConfig; 2] {
        [&self.street, &self.topo]
    }
}
