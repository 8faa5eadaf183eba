use crate::layers::base::LayerTrait;
use crate::prelude::HashMap;
use crate::{MapError, Result};

/// Owns the map's layers and keeps them in draw order
///
/// Layers are stored bottom to top by z-index; layers with equal z-index
/// keep the order they were added in.
#[derive(Default)]
pub struct LayerManager {
    stack: Vec<Box<dyn LayerTrait>>,
    positions: HashMap<String, usize>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`MapError::Layer`] if the id is already taken
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        if self.positions.contains_key(layer.id()) {
            return Err(MapError::Layer(format!("duplicate layer id '{}'", layer.id())));
        }
        log::debug!("adding {} layer '{}'", layer.layer_type(), layer.id());

        let z_index = layer.z_index();
        let slot = self
            .stack
            .iter()
            .position(|other| other.z_index() > z_index)
            .unwrap_or(self.stack.len());
        self.stack.insert(slot, layer);
        self.reindex();
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let slot = self.positions.get(layer_id).copied()?;
        let layer = self.stack.remove(slot);
        self.reindex();
        Some(layer)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        let slot = *self.positions.get(layer_id)?;
        self.stack.get(slot).map(|layer| layer.as_ref())
    }

    /// Downcasts the layer with `layer_id` to its concrete type
    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.get_layer(layer_id)?.as_any().downcast_ref::<T>()
    }

    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        let slot = *self.positions.get(layer_id)?;
        self.stack.get_mut(slot).map(|layer| f(layer.as_mut()))
    }

    /// Layer ids, bottom to top
    pub fn list_layers(&self) -> Vec<String> {
        self.stack.iter().map(|layer| layer.id().to_string()).collect()
    }

    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.stack.iter().map(|layer| layer.as_ref()).collect()
    }

    /// Layers of concrete type `T`, bottom to top
    pub fn layers_of<T: 'static>(&self) -> Vec<&T> {
        self.stack
            .iter()
            .filter_map(|layer| layer.as_any().downcast_ref::<T>())
            .collect()
    }

    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn LayerTrait),
    {
        for layer in &mut self.stack {
            f(layer.as_mut());
        }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn reindex(&mut self) {
        self.positions = self
            .stack
            .iter()
            .enumerate()
            .map(|(slot, layer)| (layer.id().to_string(), slot))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TileLayerConfig;
    use crate::layers::{marker::MarkerLayer, tile::TileLayer};

    fn manager() -> LayerManager {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(MarkerLayer::new("quakes", "Earthquakes", Vec::new())))
            .unwrap();
        manager
            .add_layer(Box::new(TileLayer::new(TileLayerConfig::street())))
            .unwrap();
        manager
            .add_layer(Box::new(TileLayer::new(TileLayerConfig::topographic())))
            .unwrap();
        manager
    }

    #[test]
    fn test_tiles_render_below_overlays() {
        let manager = manager();
        assert_eq!(manager.list_layers(), vec!["street", "topo", "quakes"]);
        assert_eq!(manager.layers_of::<TileLayer>().len(), 2);
        assert_eq!(manager.layers_of::<MarkerLayer>().len(), 1);
        assert!(manager.get_layer_as::<MarkerLayer>("street").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut manager = manager();
        let result = manager.add_layer(Box::new(TileLayer::new(TileLayerConfig::street())));
        assert!(matches!(result, Err(MapError::Layer(_))));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_remove_keeps_lookup_in_sync() {
        let mut manager = manager();
        assert!(manager.remove_layer("topo").is_some());
        assert!(manager.remove_layer("topo").is_none());
        assert_eq!(manager.list_layers(), vec!["street", "quakes"]);

        manager.with_layer_mut("quakes", |layer| layer.set_visible(false));
        assert_eq!(manager.get_layer("quakes").map(|l| l.is_visible()), Some(false));
        assert_eq!(manager.len(), 2);
    }
}
