use serde::Serialize;
use std::fmt;

pub use crate::traits::LayerOperations as LayerTrait;

/// Kind of layer, which decides how the layers control treats it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// Raster base layer; exactly one is active at a time
    Tile,
    /// Circle-marker overlay; toggled independently
    Marker,
}

impl LayerType {
    pub fn is_base(&self) -> bool {
        *self == LayerType::Tile
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayerType::Tile => "tile",
            LayerType::Marker => "marker",
        })
    }
}

/// State shared by every layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
    /// Receives clicks; only overlays do
    pub interactive: bool,
}

impl LayerProperties {
    pub fn new(id: impl Into<String>, name: impl Into<String>, layer_type: LayerType) -> Self {
        let base = layer_type.is_base();
        Self {
            id: id.into(),
            name: name.into(),
            layer_type,
            z_index: if base { 0 } else { 100 },
            opacity: 1.0,
            visible: true,
            interactive: !base,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
