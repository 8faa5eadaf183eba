//! The contract every map layer fulfils

use crate::layers::base::{LayerProperties, LayerType};
use std::any::Any;

/// A layer held by the map's layer manager
///
/// Implementors only expose their [`LayerProperties`] and `Any` casts
/// (see [`impl_layer_trait!`](crate::impl_layer_trait)); identity,
/// visibility, opacity and stacking come from the properties.
pub trait LayerOperations: Send + Sync {
    fn properties(&self) -> &LayerProperties;

    fn properties_mut(&mut self) -> &mut LayerProperties;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn id(&self) -> &str {
        &self.properties().id
    }

    /// Label shown in the layers control
    fn name(&self) -> &str {
        &self.properties().name
    }

    fn layer_type(&self) -> LayerType {
        self.properties().layer_type
    }

    fn is_visible(&self) -> bool {
        self.properties().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.properties_mut().visible = visible;
    }

    fn opacity(&self) -> f32 {
        self.properties().opacity
    }

    /// Clamped to [0, 1]
    fn set_opacity(&mut self, opacity: f32) {
        self.properties_mut().opacity = opacity.clamp(0.0, 1.0);
    }

    fn z_index(&self) -> i32 {
        self.properties().z_index
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.properties_mut().z_index = z_index;
    }

    /// Layer description for logging
    fn options(&self) -> serde_json::Value {
        self.properties().to_json()
    }
}
