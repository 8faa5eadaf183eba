use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// Highest latitude Web Mercator can show
pub const MAX_MERCATOR_LAT: f64 = 85.0511287798;

/// Geographic coordinate in degrees, latitude first
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// GeoJSON positions store longitude first
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and inside [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Same point pulled inside the Mercator-drawable world
    pub fn clamped(&self) -> Self {
        Self::new(
            self.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
            self.lng.clamp(-180.0, 180.0),
        )
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Pixel position, either world pixels or container pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn half(self) -> Point {
        self * 0.5
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Slippy-map tile address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// The tile at `zoom` that contains `lat_lng`
    pub fn containing(lat_lng: &LatLng, zoom: u8) -> Self {
        let tiles = (1u64 << zoom) as f64;
        let world = mercator_unit(lat_lng);
        let last = tiles - 1.0;

        Self::new(
            (world.x * tiles).floor().clamp(0.0, last) as u32,
            (world.y * tiles).floor().clamp(0.0, last) as u32,
            zoom,
        )
    }

    pub fn is_valid(&self) -> bool {
        let tiles = 1u64 << self.z;
        (self.x as u64) < tiles && (self.y as u64) < tiles
    }
}

/// Spherical Mercator position of `lat_lng` in the unit square, origin at
/// the north-west corner of the world
pub fn mercator_unit(lat_lng: &LatLng) -> Point {
    let clamped = lat_lng.clamped();
    let phi = clamped.lat.to_radians();
    Point::new(
        (clamped.lng + 180.0) / 360.0,
        (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / PI) / 2.0,
    )
}

/// Inverse of [`mercator_unit`]
pub fn from_mercator_unit(unit: Point) -> LatLng {
    let lat = (PI * (1.0 - 2.0 * unit.y)).sinh().atan().to_degrees();
    LatLng::new(lat, unit.x * 360.0 - 180.0)
}
