//! Prelude module for common quakemap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use quakemap::prelude::*;`

pub use crate::core::{
    config::{MarkerStyle, QuakeMapConfig, TileLayerConfig},
    geo::{LatLng, Point, TileCoord},
    map::{Map, MapContainer, MapOptions, MarkerRef},
    viewport::Viewport,
};

pub use crate::compose::{compose, load_earthquake_map};

pub use crate::data::geojson::{EarthquakeFeature, EarthquakeFeed};

pub use crate::feed::{fetch_feed, FeedSource, HttpFeedSource, StaticFeedSource};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    manager::LayerManager,
    marker::{CircleMarker, MarkerLayer},
    tile::TileLayer,
};

pub use crate::style::{classify, Color, DepthBucket, DepthScale};

pub use crate::transform::FeatureTransformer;

pub use crate::ui::{
    ControlManager, ControlPosition, LayerAction, Legend, LayersControl, Popup, PopupContent,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{spawn, spawn_with_result, AsyncHandle, TaskHandle};

#[cfg(feature = "tokio-runtime")]
pub use crate::tiles::{TileLoader, TileLoaderConfig};

#[cfg(feature = "egui")]
pub use crate::ui::QuakeMapWidget;

pub use crate::{MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
