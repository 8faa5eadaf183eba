pub mod geojson;

pub use geojson::{EarthquakeFeature, EarthquakeFeed, FeedMetadata, QuakeGeometry, QuakeProperties};
