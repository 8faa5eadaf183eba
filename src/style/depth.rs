//! Depth → color classification
//!
//! Hypocenter depth (km, positive below sea level) is bucketed into six
//! contiguous ranges, each with a fixed color. Buckets are tested in order,
//! lower bound inclusive and upper bound exclusive. A depth that matches no
//! bucket falls through to the last one, so the deepest color also covers
//! depths below -10 km and NaN.

use crate::style::color::Color;
use serde::{Deserialize, Serialize};

/// One contiguous depth range and its display color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthBucket {
    /// Inclusive lower bound in kilometers
    pub lower: f64,
    /// Exclusive upper bound in kilometers; `None` is unbounded
    pub upper: Option<f64>,
    pub color: Color,
    /// Legend label, e.g. `"10-30"` or `"90+"`
    pub label: String,
}

impl DepthBucket {
    pub fn new(lower: f64, upper: Option<f64>, color: Color, label: impl Into<String>) -> Self {
        Self {
            lower,
            upper,
            color,
            label: label.into(),
        }
    }

    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.lower && self.upper.map_or(true, |upper| depth < upper)
    }
}

/// The fixed six-row table: (lower, upper, color, label)
pub const DEPTH_BUCKETS: [(f64, Option<f64>, Color, &str); 6] = [
    (-10.0, Some(10.0), Color::rgb(0x0f, 0xeb, 0x2d), "-10-10"),
    (10.0, Some(30.0), Color::rgb(0xee, 0xf1, 0x31), "10-30"),
    (30.0, Some(50.0), Color::rgb(0xf7, 0xca, 0x04), "30-50"),
    (50.0, Some(70.0), Color::rgb(0xf7, 0x8d, 0x04), "50-70"),
    (70.0, Some(90.0), Color::rgb(0xf7, 0x51, 0x04), "70-90"),
    (90.0, None, Color::rgb(0xd1, 0x00, 0x00), "90+"),
];

/// Classifies a depth against the fixed table
pub fn classify(depth: f64) -> Color {
    DEPTH_BUCKETS
        .iter()
        .find(|(lower, upper, _, _)| depth >= *lower && upper.map_or(true, |u| depth < u))
        .map(|(_, _, color, _)| *color)
        .unwrap_or(DEPTH_BUCKETS[DEPTH_BUCKETS.len() - 1].2)
}

/// Ordered, non-empty set of depth buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DepthBucket>", into = "Vec<DepthBucket>")]
pub struct DepthScale {
    buckets: Vec<DepthBucket>,
}

impl DepthScale {
    /// Builds a scale from ordered buckets; the last bucket is the fallback
    pub fn new(buckets: Vec<DepthBucket>) -> crate::Result<Self> {
        if buckets.is_empty() {
            return Err(crate::MapError::Style(
                "depth scale needs at least one bucket".to_string(),
            ));
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> &[DepthBucket] {
        &self.buckets
    }

    /// First bucket containing `depth`, else the last bucket
    pub fn bucket_for(&self, depth: f64) -> &DepthBucket {
        let fallback = &self.buckets[self.buckets.len() - 1];
        self.buckets
            .iter()
            .find(|bucket| bucket.contains(depth))
            .unwrap_or(fallback)
    }

    pub fn classify(&self, depth: f64) -> Color {
        self.bucket_for(depth).color
    }
}

impl TryFrom<Vec<DepthBucket>> for DepthScale {
    type Error = crate::MapError;

    fn try_from(buckets: Vec<DepthBucket>) -> Result<Self, Self::Error> {
        Self::new(buckets)
    }
}

impl From<DepthScale> for Vec<DepthBucket> {
    fn from(scale: DepthScale) -> Self {
        scale.buckets
    }
}

impl Default for DepthScale {
    fn default() -> Self {
        Self {
            buckets: DEPTH_BUCKETS
                .iter()
                .map(|(lower, upper, color, label)| DepthBucket::new(*lower, *upper, *color, *label))
                .collect(),
        }
    }
}
