use crate::{
    core::{
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    style::color::Color,
    ui::popup::PopupContent,
};

/// Smallest radius (pixels) a click can hit, so micro-events stay clickable
const MIN_HIT_RADIUS: f64 = 3.0;

/// Fixed-pixel-radius circle at a geographic position
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    position: LatLng,
    /// Screen radius in pixels; not clamped, may be zero or negative
    radius: f64,
    stroke_color: Color,
    stroke_weight: f32,
    fill_color: Color,
    fill_opacity: f32,
    popup: Option<PopupContent>,
}

impl CircleMarker {
    pub fn new(position: LatLng, radius: f64) -> Self {
        Self {
            position,
            radius,
            stroke_color: Color::PURPLE,
            stroke_weight: 1.0,
            fill_color: Color::PURPLE,
            fill_opacity: 1.0,
            popup: None,
        }
    }

    pub fn with_stroke(mut self, color: Color, weight: f32) -> Self {
        self.stroke_color = color;
        self.stroke_weight = weight;
        self
    }

    pub fn with_fill(mut self, color: Color, opacity: f32) -> Self {
        self.fill_color = color;
        self.fill_opacity = opacity;
        self
    }

    pub fn with_popup(mut self, popup: PopupContent) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn stroke_weight(&self) -> f32 {
        self.stroke_weight
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn fill_opacity(&self) -> f32 {
        self.fill_opacity
    }

    pub fn popup(&self) -> Option<&PopupContent> {
        self.popup.as_ref()
    }

    /// Whether a marker with this radius draws anything
    pub fn is_drawable(&self) -> bool {
        self.radius > 0.0
    }

    /// Hit-test against a point in container pixels
    pub fn contains_point(&self, point: &Point, viewport: &Viewport) -> bool {
        if !self.position.is_valid() {
            return false;
        }
        let center = viewport.lat_lng_to_pixel(&self.position);
        let reach = self.radius.max(MIN_HIT_RADIUS) + self.stroke_weight as f64 / 2.0;
        center.distance_to(point) <= reach
    }
}

/// Overlay holding a group of circle markers
pub struct MarkerLayer {
    properties: LayerProperties,
    markers: Vec<CircleMarker>,
}

impl MarkerLayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, markers: Vec<CircleMarker>) -> Self {
        let properties = LayerProperties::new(id.into(), name.into(), LayerType::Marker);
        Self {
            properties,
            markers,
        }
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn marker(&self, index: usize) -> Option<&CircleMarker> {
        self.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Index of the topmost marker under `point`. Later markers draw on top,
    /// so the search runs back to front.
    pub fn marker_at(&self, point: &Point, viewport: &Viewport) -> Option<usize> {
        self.markers
            .iter()
            .rposition(|marker| marker.contains_point(point, viewport))
    }
}

impl LayerTrait for MarkerLayer {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        let mut options = self.properties.to_json();
        options["markers"] = self.markers.len().into();
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(0.0, 0.0), 5.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_hit_test_uses_pixel_radius() {
        let viewport = viewport();
        let marker = CircleMarker::new(LatLng::new(0.0, 0.0), 20.0);

        assert!(marker.contains_point(&Point::new(400.0, 300.0), &viewport));
        assert!(marker.contains_point(&Point::new(415.0, 300.0), &viewport));
        assert!(!marker.contains_point(&Point::new(430.0, 300.0), &viewport));
    }

    #[test]
    fn test_negative_radius_kept_but_not_drawable() {
        let marker = CircleMarker::new(LatLng::new(0.0, 0.0), -2.5);
        assert_eq!(marker.radius(), -2.5);
        assert!(!marker.is_drawable());
        // still clickable at its center
        assert!(marker.contains_point(&Point::new(400.0, 300.0), &viewport()));
    }

    #[test]
    fn test_topmost_marker_wins() {
        let viewport = viewport();
        let layer = MarkerLayer::new(
            "quakes",
            "Earthquakes",
            vec![
                CircleMarker::new(LatLng::new(0.0, 0.0), 30.0),
                CircleMarker::new(LatLng::new(0.0, 0.0), 10.0),
                CircleMarker::new(LatLng::new(40.0, 40.0), 10.0),
            ],
        );

        assert_eq!(layer.marker_at(&Point::new(400.0, 300.0), &viewport), Some(1));
        assert_eq!(layer.marker_at(&Point::new(420.0, 300.0), &viewport), Some(0));
        assert_eq!(layer.marker_at(&Point::new(10.0, 10.0), &viewport), None);
    }

    #[test]
    fn test_layer_options() {
        let layer = MarkerLayer::new(
            "quakes",
            "Earthquakes",
            vec![
                CircleMarker::new(LatLng::new(10.0, -20.0), 5.0),
                CircleMarker::new(LatLng::new(-5.0, 30.0), 5.0),
            ],
        );

        assert_eq!(layer.options()["markers"], 2);
        assert_eq!(layer.layer_type(), LayerType::Marker);

        let empty = MarkerLayer::new("none", "None", Vec::new());
        assert_eq!(empty.options()["markers"], 0);
    }
}
