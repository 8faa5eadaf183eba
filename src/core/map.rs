use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::{base::LayerTrait, manager::LayerManager, marker::MarkerLayer, tile::TileLayer},
    ui::{
        controls::{ControlManager, LayerAction},
        popup::Popup,
    },
    MapError, Result,
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub zoom_delta: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            dragging: true,
            scroll_wheel_zoom: true,
            min_zoom: None,
            max_zoom: None,
            zoom_delta: 1.0,
        }
    }
}

/// The surface a map is mounted into, identified by id
#[derive(Debug, Clone, PartialEq)]
pub struct MapContainer {
    id: String,
    size: Point,
}

impl MapContainer {
    pub fn new(id: impl Into<String>, size: Point) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> Point {
        self.size
    }
}

/// Location of a marker inside the map: overlay id plus index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRef {
    pub layer_id: String,
    pub index: usize,
}

pub struct Map {
    pub viewport: Viewport,
    container_id: String,
    layer_manager: LayerManager,
    controls: ControlManager,
    options: MapOptions,
    popup: Option<Popup>,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let viewport = Viewport::new(center, zoom, size);
        Self::with_options(viewport, MapOptions::default())
    }

    pub fn with_options(viewport: Viewport, options: MapOptions) -> Self {
        let mut map = Self {
            viewport,
            container_id: String::new(),
            layer_manager: LayerManager::new(),
            controls: ControlManager::new(),
            options,
            popup: None,
        };

        if let (Some(min), Some(max)) = (map.options.min_zoom, map.options.max_zoom) {
            map.viewport.set_zoom_limits(min, max);
        }

        map
    }

    /// Mounts a map into `container`, which must carry `expected_id`
    pub fn mount(
        container: &MapContainer,
        expected_id: &str,
        center: LatLng,
        zoom: f64,
        options: MapOptions,
    ) -> Result<Self> {
        if container.id() != expected_id {
            return Err(MapError::ContainerNotFound(expected_id.to_string()));
        }

        let mut map = Self::with_options(Viewport::new(center, zoom, container.size()), options);
        map.container_id = container.id().to_string();
        Ok(map)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() || !zoom.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "cannot view ({}, {}) at zoom {}",
                center.lat, center.lng, zoom
            )));
        }

        self.viewport.set_zoom(zoom);
        self.viewport.set_center(center);
        Ok(())
    }

    /// Moves the view by a screen-space drag of `delta` pixels
    pub fn pan(&mut self, delta: Point) {
        if self.options.dragging {
            self.viewport.pan(delta);
        }
    }

    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        self.viewport.zoom_to(zoom, focus_point);
    }

    /// Steps the zoom by `zoom_delta` in the direction of `steps`
    pub fn zoom_by(&mut self, steps: f64, focus_point: Option<Point>) {
        if !self.options.scroll_wheel_zoom || steps == 0.0 {
            return;
        }
        let target = self.viewport.zoom + steps.signum() * self.options.zoom_delta;
        self.zoom_to(target.round(), focus_point);
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.layer_manager.add_layer(layer)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        if self.layer_manager.remove_layer(layer_id).is_none() {
            return Err(MapError::Layer(format!("no layer '{}'", layer_id)));
        }
        if self.popup.as_ref().is_some_and(|p| p.layer_id == layer_id) {
            self.popup = None;
        }
        Ok(())
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layer_manager.with_layer_mut(layer_id, f)
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layer_manager.list_layers()
    }

    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.layer_manager.layers()
    }

    pub fn base_layers(&self) -> Vec<&TileLayer> {
        self.layer_manager.layers_of::<TileLayer>()
    }

    /// The visible base layer, if any
    pub fn active_base_layer(&self) -> Option<&TileLayer> {
        self.base_layers().into_iter().find(|layer| layer.is_visible())
    }

    pub fn overlays(&self) -> Vec<&MarkerLayer> {
        self.layer_manager.layers_of::<MarkerLayer>()
    }

    pub fn overlay(&self, layer_id: &str) -> Option<&MarkerLayer> {
        self.layer_manager.get_layer_as::<MarkerLayer>(layer_id)
    }

    /// Shows `layer_id` and hides every other base layer
    pub fn select_base_layer(&mut self, layer_id: &str) -> Result<()> {
        let is_base = self
            .get_layer(layer_id)
            .is_some_and(|layer| layer.layer_type().is_base());
        if !is_base {
            return Err(MapError::Layer(format!("'{}' is not a base layer", layer_id)));
        }

        self.layer_manager.for_each_layer_mut(|layer| {
            if layer.layer_type().is_base() {
                layer.set_visible(layer.id() == layer_id);
            }
        });
        log::debug!("base layer switched to '{}'", layer_id);
        Ok(())
    }

    pub fn toggle_overlay(&mut self, layer_id: &str, visible: bool) -> Result<()> {
        let updated = self.layer_manager.with_layer_mut(layer_id, |layer| {
            if layer.layer_type().is_base() {
                return false;
            }
            layer.set_visible(visible);
            true
        });
        if updated != Some(true) {
            return Err(MapError::Layer(format!("'{}' is not an overlay", layer_id)));
        }

        if !visible && self.popup.as_ref().is_some_and(|p| p.layer_id == layer_id) {
            self.popup = None;
        }
        Ok(())
    }

    pub fn apply_layer_action(&mut self, action: LayerAction) -> Result<()> {
        match action {
            LayerAction::SelectBase(id) => self.select_base_layer(&id),
            LayerAction::ToggleOverlay { id, visible } => self.toggle_overlay(&id, visible),
        }
    }

    pub fn set_controls(&mut self, controls: ControlManager) {
        self.controls = controls;
    }

    pub fn controls(&self) -> &ControlManager {
        &self.controls
    }

    /// Topmost marker of a visible overlay under `point` (container pixels)
    pub fn marker_at(&self, point: &Point) -> Option<MarkerRef> {
        self.overlays()
            .into_iter()
            .rev()
            .filter(|layer| layer.is_visible())
            .find_map(|layer| {
                layer.marker_at(point, &self.viewport).map(|index| MarkerRef {
                    layer_id: layer.id().to_string(),
                    index,
                })
            })
    }

    /// Opens the popup bound to a marker, replacing any open popup
    pub fn open_popup(&mut self, marker: &MarkerRef) -> Result<&Popup> {
        let popup = {
            let layer = self
                .overlay(&marker.layer_id)
                .ok_or_else(|| MapError::Layer(format!("no overlay '{}'", marker.layer_id)))?;
            let circle = layer.marker(marker.index).ok_or_else(|| {
                MapError::Layer(format!("no marker {} in '{}'", marker.index, marker.layer_id))
            })?;
            let content = circle.popup().cloned().ok_or_else(|| {
                MapError::Layer(format!("marker {} has no popup", marker.index))
            })?;

            Popup {
                layer_id: marker.layer_id.clone(),
                marker_index: marker.index,
                position: circle.position(),
                content,
            }
        };

        Ok(self.popup.insert(popup))
    }

    /// Click handling: opens the popup of the marker under `point`, or
    /// closes the open popup when the click hits no marker
    pub fn click(&mut self, point: &Point) -> Option<&Popup> {
        match self.marker_at(point) {
            Some(marker) => match self.open_popup(&marker) {
                Ok(popup) => Some(popup),
                Err(e) => {
                    log::debug!("click on marker without popup: {}", e);
                    None
                }
            },
            None => {
                self.close_popup();
                None
            }
        }
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }
}
