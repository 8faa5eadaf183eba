//! # quakemap
//!
//! Live earthquake map built on a small Leaflet-style layer model.
//!
//! The pipeline reads the USGS weekly GeoJSON feed once, turns every event
//! into a circle marker (radius from magnitude, fill from depth), and
//! composes a map with two base tile layers, the marker overlay, an
//! always-expanded layers control and a depth legend. With the `egui`
//! feature the composed map can be drawn and explored interactively.
//!
//! ```no_run
//! # async fn run() -> quakemap::Result<()> {
//! use quakemap::prelude::*;
//!
//! let config = QuakeMapConfig::default();
//! let source = HttpFeedSource::new(config.feed_url.clone());
//! let container = MapContainer::new(config.container_id.clone(), Point::new(1200.0, 800.0));
//! let map = load_earthquake_map(&config, &source, &container).await?;
//! println!("{} layers", map.list_layers().len());
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod core;
pub mod data;
pub mod feed;
pub mod layers;
pub mod prelude;
#[cfg(feature = "tokio-runtime")]
pub mod runtime;
pub mod style;
pub mod tiles;
pub mod traits;
pub mod transform;
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::QuakeMapConfig,
    geo::{LatLng, Point, TileCoord},
    map::{Map, MapContainer},
    viewport::Viewport,
};

pub use compose::{compose, load_earthquake_map};
pub use data::geojson::{EarthquakeFeature, EarthquakeFeed};
pub use feed::{FeedSource, HttpFeedSource, StaticFeedSource};
pub use layers::{marker::CircleMarker, marker::MarkerLayer, tile::TileLayer};
pub use style::{classify, Color, DepthScale};
pub use transform::FeatureTransformer;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Feed decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Map container not found: {0}")]
    ContainerNotFound(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Image error: {0}")]
    Image(String),
}

/// Error type alias for convenience
pub type Error = MapError;
