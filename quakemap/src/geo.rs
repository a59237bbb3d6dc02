//! Geographic and cartesian primitives, and the Web Mercator projection used by the map.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Semi-major axis of the WGS84 ellipsoid, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half of the Web Mercator world extent, in meters.
pub const MERCATOR_HALF_EXTENT: f64 = EARTH_RADIUS * std::f64::consts::PI;

/// Latitude beyond which Web Mercator is not defined.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Creates a [`LatLon`] point: `latlon!(37.09, -95.71)`.
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::geo::LatLon::new($lat, $lon)
    };
}

/// Geographic point in degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

impl LatLon {
    /// Creates a new point.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Cartesian point. Used both for projected map coordinates (meters) and screen pixels.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2 {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to the other point.
    pub fn distance(&self, other: &Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// Minimum X.
    pub x_min: f64,
    /// Minimum Y.
    pub y_min: f64,
    /// Maximum X.
    pub x_max: f64,
    /// Maximum Y.
    pub y_max: f64,
}

impl Rect {
    /// Creates a rectangle from two corners given in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x_min: x1.min(x2),
            y_min: y1.min(y2),
            x_max: x1.max(x2),
            y_max: y1.max(y2),
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns true if the rectangles share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }
}

/// Size of a screen area in pixels.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Half of the width.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Half of the height.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Spherical Web Mercator (EPSG:3857).
#[derive(Debug, Default, Copy, Clone)]
pub struct WebMercator;

impl WebMercator {
    /// Projects a geographic point into meters. Latitude is clamped to the projection limits.
    pub fn project(&self, point: &LatLon) -> Point2 {
        let lat = point.lat().clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let x = EARTH_RADIUS * point.lon().to_radians();
        let y = EARTH_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        Point2::new(x, y)
    }

    /// Converts projected meters back into a geographic point.
    pub fn unproject(&self, point: &Point2) -> LatLon {
        let lat = FRAC_PI_2 - 2.0 * (-point.y / EARTH_RADIUS).exp().atan();
        let lon = point.x / EARTH_RADIUS;
        LatLon::new(lat.to_degrees(), lon.to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn projection_roundtrip() {
        let point = latlon!(37.09, -95.71);
        let projected = WebMercator.project(&point);
        assert_abs_diff_eq!(projected.x, -10_654_388.46, epsilon = 0.01);

        let back = WebMercator.unproject(&projected);
        assert_abs_diff_eq!(back.lat(), 37.09, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lon(), -95.71, epsilon = 1e-9);
    }

    #[test]
    fn projection_extent() {
        let corner = WebMercator.project(&latlon!(90.0, 180.0));
        assert_abs_diff_eq!(corner.x, MERCATOR_HALF_EXTENT, epsilon = 1e-6);
        assert_abs_diff_eq!(corner.y, MERCATOR_HALF_EXTENT, epsilon = 1e-3);
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert_eq!(Rect::new(10.0, 10.0, 0.0, 0.0), a);
    }
}
