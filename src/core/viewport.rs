use crate::core::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{from_mercator_unit, mercator_unit, LatLng, Point, TileCoord};
use serde::{Deserialize, Serialize};

/// What part of the world the map container shows
///
/// Positions are converted between three spaces: geographic (`LatLng`),
/// world pixels at the current zoom (`project`) and container pixels with
/// the origin at the top-left corner of the map (`lat_lng_to_pixel`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    /// Container size in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center: center.clamped(),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center.clamped();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Limits given in either order are accepted
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = min_zoom.max(max_zoom);
        self.set_zoom(self.zoom);
    }

    /// World width in pixels at the current zoom
    pub fn world_size(&self) -> f64 {
        world_size_at(self.zoom)
    }

    /// World pixel position of `lat_lng`
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        mercator_unit(lat_lng) * self.world_size()
    }

    pub fn unproject(&self, world: &Point) -> LatLng {
        from_mercator_unit(*world * (1.0 / self.world_size()))
    }

    /// World pixel at the container's top-left corner
    fn top_left(&self) -> Point {
        self.project(&self.center) - self.size.half()
    }

    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        self.project(lat_lng) - self.top_left()
    }

    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        self.unproject(&(*pixel + self.top_left()))
    }

    /// Moves the content by `delta` pixels, as a drag does: dragging right
    /// moves the center west
    pub fn pan(&mut self, delta: Point) {
        let center = self.size.half() - delta;
        self.set_center(self.pixel_to_lat_lng(&center));
    }

    /// Changes zoom, keeping the geographic point under `focus_point`
    /// (container pixels) in place when one is given
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (zoom - self.zoom).abs() < 1e-3 {
            return;
        }

        let Some(focus) = focus_point else {
            self.zoom = zoom;
            return;
        };

        let anchor = self.pixel_to_lat_lng(&focus);
        self.zoom = zoom;
        let drifted = self.lat_lng_to_pixel(&anchor);
        self.pan(focus - drifted);
    }

    /// Tiles covering the container at the integer zoom nearest below the
    /// current one, limited to the provider's `[min_zoom, max_zoom]`
    /// (swapped limits are put back in order)
    pub fn visible_tiles(&self, min_zoom: u8, max_zoom: u8) -> Vec<TileCoord> {
        let (low, high) = (min_zoom.min(max_zoom), min_zoom.max(max_zoom));
        let zoom = (self.zoom.floor().max(0.0) as u8).clamp(low, high);
        let span = self.tile_span(zoom);
        let last = (1i64 << zoom) - 1;

        let top_left = self.top_left();
        let bottom_right = top_left + self.size;
        let index = |v: f64| ((v / span).floor() as i64).clamp(0, last);

        let xs = index(top_left.x)..=index(bottom_right.x);
        let ys = index(top_left.y)..=index(bottom_right.y);
        xs.flat_map(|x| ys.clone().map(move |y| TileCoord::new(x as u32, y as u32, zoom)))
            .collect()
    }

    /// Container-pixel rectangle (min, max) covered by a tile
    pub fn tile_screen_bounds(&self, coord: &TileCoord) -> (Point, Point) {
        let span = self.tile_span(coord.z);
        let min = Point::new(coord.x as f64, coord.y as f64) * span - self.top_left();
        (min, min + Point::new(span, span))
    }

    /// On-screen size of one tile of zoom `z`
    fn tile_span(&self, z: u8) -> f64 {
        self.world_size() / (1u64 << z) as f64
    }
}

fn world_size_at(zoom: f64) -> f64 {
    TILE_SIZE as f64 * zoom.exp2()
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), MIN_ZOOM, Point::new(800.0, 600.0))
    }
}
