//! Typed schema of the USGS earthquake GeoJSON feed
//!
//! The feed is decoded at the fetch boundary. Every feature must carry
//! `properties.place`, `properties.time`, `properties.mag` and a
//! three-element `geometry.coordinates` (longitude, latitude, depth);
//! a single malformed feature fails the whole document with
//! [`MapError::Decode`](crate::MapError::Decode). `place` and `mag` may be
//! `null` (USGS publishes events before a magnitude is computed) but the
//! keys themselves must be present.

use crate::core::geo::LatLng;
use serde::{Deserialize, Deserializer, Serialize};

/// Root feature collection of the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<EarthquakeFeature>,
}

/// Optional header USGS attaches to every summary feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Generation time, epoch milliseconds
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// One earthquake event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub properties: QuakeProperties,
    pub geometry: QuakeGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeProperties {
    #[serde(deserialize_with = "required_nullable")]
    pub place: Option<String>,
    /// Origin time, epoch milliseconds
    pub time: i64,
    /// Magnitude; may be zero or negative for micro-events
    #[serde(deserialize_with = "required_nullable")]
    pub mag: Option<f64>,
    /// Event page on the USGS site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A key that must be present but may hold `null`
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeGeometry {
    /// (longitude, latitude, depth in km)
    pub coordinates: [f64; 3],
}

impl EarthquakeFeature {
    pub fn new(place: impl Into<String>, time: i64, mag: f64, coordinates: [f64; 3]) -> Self {
        Self {
            id: None,
            properties: QuakeProperties {
                place: Some(place.into()),
                time,
                mag: Some(mag),
                url: None,
            },
            geometry: QuakeGeometry { coordinates },
        }
    }

    pub fn place(&self) -> Option<&str> {
        self.properties.place.as_deref()
    }

    pub fn time_ms(&self) -> i64 {
        self.properties.time
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.geometry.coordinates[1]
    }

    /// Depth in km; negative above the sea-level reference
    pub fn depth(&self) -> f64 {
        self.geometry.coordinates[2]
    }

    /// Epicenter as (lat, lng), swapped from the GeoJSON (lng, lat) order
    pub fn position(&self) -> LatLng {
        LatLng::from_lng_lat(self.longitude(), self.latitude())
    }
}

impl EarthquakeFeed {
    pub fn new(features: Vec<EarthquakeFeature>) -> Self {
        Self {
            metadata: None,
            features,
        }
    }

    /// Decodes a feed document
    pub fn from_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a feed document from raw response bytes
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
