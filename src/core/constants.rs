//! Fixed constants of the earthquake map: feed location, initial view,
//! tile providers and marker styling. `QuakeMapConfig::default()` is built
//! from these; nothing else should embed the literals.

/// USGS summary feed of every event recorded in the past week.
pub const FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Identifier of the container the map view is mounted into.
pub const MAP_CONTAINER_ID: &str = "map";

/// Initial map center (lat, lng), roughly the geographic center of the US.
pub const DEFAULT_CENTER: (f64, f64) = (37.09, -95.71);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom range supported by both tile providers.
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 17.0;

pub const STREET_LAYER_NAME: &str = "Street Map";
pub const STREET_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const STREET_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

pub const TOPO_LAYER_NAME: &str = "Topographic Map";
pub const TOPO_TILE_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";
pub const TOPO_ATTRIBUTION: &str = "Map data: &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)";

/// Subdomains rotated through by both tile providers.
pub const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

pub const OVERLAY_LAYER_NAME: &str = "Earthquakes";

/// Marker radius in pixels per unit of magnitude.
pub const MAGNITUDE_RADIUS_SCALE: f64 = 5.0;

/// Stroke weight of every circle marker, in pixels.
pub const MARKER_STROKE_WEIGHT: f32 = 0.7;

/// Fill opacity of every circle marker.
pub const MARKER_FILL_OPACITY: f32 = 0.7;

/// Legend heading. Rendered on three lines in the HTML legend.
pub const LEGEND_TITLE: &str = "Depth color scale";
