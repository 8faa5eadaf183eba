//! Earthquake feature → circle marker

use crate::{
    core::config::MarkerStyle,
    data::geojson::EarthquakeFeature,
    layers::marker::CircleMarker,
    style::depth::DepthScale,
    ui::popup::PopupContent,
};
use chrono::{DateTime, Utc};

/// Largest magnitude of an epoch-millisecond timestamp a calendar date is
/// rendered for; anything beyond prints as `Invalid Date`
const MAX_TIMESTAMP_MS: i64 = 8_640_000_000_000_000;

const INVALID_DATE: &str = "Invalid Date";

/// How an absent place or magnitude reads in the popup
const NULL_TEXT: &str = "null";

/// Maps feed features onto styled markers
#[derive(Debug, Clone, Default)]
pub struct FeatureTransformer {
    style: MarkerStyle,
    scale: DepthScale,
}

impl FeatureTransformer {
    pub fn new(style: MarkerStyle, scale: DepthScale) -> Self {
        Self { style, scale }
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Builds the marker for one feature. Radius is magnitude times the
    /// radius scale with no clamping (0 without a magnitude); fill color
    /// comes from the depth.
    pub fn transform(&self, feature: &EarthquakeFeature) -> CircleMarker {
        let radius = feature.magnitude().unwrap_or(0.0) * self.style.radius_scale;
        let fill = self.scale.classify(feature.depth());

        CircleMarker::new(feature.position(), radius)
            .with_stroke(self.style.stroke_color, self.style.stroke_weight)
            .with_fill(fill, self.style.fill_opacity)
            .with_popup(popup_for(feature))
    }

    /// One marker per feature, in feed order
    pub fn transform_all(&self, features: &[EarthquakeFeature]) -> Vec<CircleMarker> {
        features.iter().map(|f| self.transform(f)).collect()
    }
}

/// Transforms with the default style and depth scale
pub fn transform(feature: &EarthquakeFeature) -> CircleMarker {
    FeatureTransformer::default().transform(feature)
}

/// Popup describing place, time, magnitude and depth
pub fn popup_for(feature: &EarthquakeFeature) -> PopupContent {
    let magnitude = feature
        .magnitude()
        .map_or_else(|| NULL_TEXT.to_string(), |mag| mag.to_string());

    PopupContent::new(feature.place().unwrap_or(NULL_TEXT))
        .with_line(format_time(feature.time_ms()))
        .with_line(format!("Magnitude: {}", magnitude))
        .with_line(format!("Depth: {}", feature.depth()))
}

/// Renders epoch milliseconds as a UTC date string,
/// e.g. `Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)`
pub fn format_time(ms: i64) -> String {
    if ms.checked_abs().map_or(true, |abs| abs > MAX_TIMESTAMP_MS) {
        return INVALID_DATE.to_string();
    }

    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(time) => time
            .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}
