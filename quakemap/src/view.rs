use crate::geo::{LatLon, Point2, Rect, Size, WebMercator, MERCATOR_HALF_EXTENT};

/// Size of a tile side in pixels at integer zoom levels.
pub(crate) const TILE_SIZE: f64 = 256.0;

/// Resolution (meters per pixel) at zoom level 0.
const ZERO_ZOOM_RESOLUTION: f64 = 2.0 * MERCATOR_HALF_EXTENT / TILE_SIZE;

/// Map view specifies which part of the map is shown on the screen: the center point in Web
/// Mercator meters, the zoom level and the screen size in pixels.
///
/// Zoom levels follow the usual slippy map convention: at zoom `z` the world is
/// `256 * 2^z` pixels wide. Fractional zoom levels are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: Point2,
    zoom: f64,
    size: Size,
}

impl MapView {
    /// Creates a view centered at the given geographic point.
    pub fn new(center: &LatLon, zoom: f64) -> Self {
        Self::new_projected(WebMercator.project(center), zoom)
    }

    /// Creates a view centered at the given projected point.
    pub fn new_projected(center: Point2, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            size: Size::default(),
        }
    }

    /// Center of the view in projected coordinates.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Center of the view as a geographic point.
    pub fn center_latlon(&self) -> LatLon {
        WebMercator.unproject(&self.center)
    }

    /// Zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Size of a screen pixel in map meters.
    pub fn resolution(&self) -> f64 {
        ZERO_ZOOM_RESOLUTION / 2f64.powf(self.zoom)
    }

    /// Screen size of the view.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy of the view with the given screen size.
    pub fn with_size(&self, size: Size) -> Self {
        Self { size, ..*self }
    }

    /// Returns a copy of the view with the given zoom level.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self { zoom, ..*self }
    }

    /// Returns a copy of the view centered at the given geographic point.
    pub fn with_center(&self, center: &LatLon) -> Self {
        Self {
            center: WebMercator.project(center),
            ..*self
        }
    }

    /// Area of the map covered by the screen. `None` if the view has no size yet.
    pub fn get_bbox(&self) -> Option<Rect> {
        if self.size.is_zero() {
            return None;
        }

        let half_width = self.size.half_width() * self.resolution();
        let half_height = self.size.half_height() * self.resolution();
        Some(Rect::new(
            self.center.x - half_width,
            self.center.y - half_height,
            self.center.x + half_width,
            self.center.y + half_height,
        ))
    }

    /// Converts projected map coordinates into screen pixels (origin at the top left corner).
    pub fn map_to_screen(&self, point: &Point2) -> Point2 {
        let resolution = self.resolution();
        Point2::new(
            (point.x - self.center.x) / resolution + self.size.half_width(),
            (self.center.y - point.y) / resolution + self.size.half_height(),
        )
    }

    /// Converts screen pixels into projected map coordinates.
    pub fn screen_to_map(&self, point: &Point2) -> Point2 {
        let resolution = self.resolution();
        Point2::new(
            self.center.x + (point.x - self.size.half_width()) * resolution,
            self.center.y - (point.y - self.size.half_height()) * resolution,
        )
    }

    /// Screen position of a geographic point.
    pub fn latlon_to_screen(&self, point: &LatLon) -> Point2 {
        self.map_to_screen(&WebMercator.project(point))
    }

    /// Moves the view so that the map content shifts by the given amount of screen pixels.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let resolution = self.resolution();
        Self {
            center: Point2::new(
                self.center.x - dx * resolution,
                self.center.y + dy * resolution,
            ),
            ..*self
        }
    }

    /// Changes the zoom level keeping the map point under `anchor` (screen pixels) in place.
    pub fn zoom_around(&self, zoom: f64, anchor: &Point2) -> Self {
        let fixed = self.screen_to_map(anchor);
        let zoomed = self.with_zoom(zoom);
        let resolution = zoomed.resolution();

        Self {
            center: Point2::new(
                fixed.x - (anchor.x - self.size.half_width()) * resolution,
                fixed.y + (anchor.y - self.size.half_height()) * resolution,
            ),
            ..zoomed
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::latlon;

    fn view() -> MapView {
        MapView::new(&latlon!(37.09, -95.71), 5.0).with_size(Size::new(800.0, 600.0))
    }

    #[test]
    fn resolution_by_zoom() {
        assert_abs_diff_eq!(view().with_zoom(0.0).resolution(), 156_543.033_928, epsilon = 1e-5);
        assert_abs_diff_eq!(view().resolution() * 32.0, 156_543.033_928, epsilon = 1e-5);
    }

    #[test]
    fn center_is_in_the_middle_of_the_screen() {
        let view = view();
        let center = view.latlon_to_screen(&latlon!(37.09, -95.71));
        assert_abs_diff_eq!(center.x, 400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(center.y, 300.0, epsilon = 1e-6);

        let restored = view.center_latlon();
        assert_abs_diff_eq!(restored.lat(), 37.09, epsilon = 1e-9);
    }

    #[test]
    fn screen_map_conversion() {
        let view = view();
        let screen = Point2::new(10.0, 590.0);
        let back = view.map_to_screen(&view.screen_to_map(&screen));
        assert_abs_diff_eq!(back.x, screen.x, epsilon = 1e-6);
        assert_abs_diff_eq!(back.y, screen.y, epsilon = 1e-6);

        // North is up.
        assert!(view.screen_to_map(&Point2::new(0.0, 0.0)).y > view.center().y);
    }

    #[test]
    fn bbox_covers_screen() {
        let view = view();
        let bbox = view.get_bbox().unwrap();
        assert_abs_diff_eq!(bbox.width(), 800.0 * view.resolution(), epsilon = 1e-6);
        assert_abs_diff_eq!(bbox.height(), 600.0 * view.resolution(), epsilon = 1e-6);
        assert!(MapView::new(&latlon!(0.0, 0.0), 1.0).get_bbox().is_none());
    }

    #[test]
    fn translate_follows_pointer() {
        let view = view();
        let grabbed = view.screen_to_map(&Point2::new(100.0, 100.0));
        let moved = view.translate(30.0, -20.0);
        let now_at = moved.map_to_screen(&grabbed);
        assert_abs_diff_eq!(now_at.x, 130.0, epsilon = 1e-6);
        assert_abs_diff_eq!(now_at.y, 80.0, epsilon = 1e-6);
    }

    #[test]
    fn zoom_keeps_anchor() {
        let view = view();
        let anchor = Point2::new(200.0, 450.0);
        let fixed = view.screen_to_map(&anchor);
        let zoomed = view.zoom_around(6.5, &anchor);

        assert_eq!(zoomed.zoom(), 6.5);
        let now_at = zoomed.map_to_screen(&fixed);
        assert_abs_diff_eq!(now_at.x, anchor.x, epsilon = 1e-6);
        assert_abs_diff_eq!(now_at.y, anchor.y, epsilon = 1e-6);
    }
}
