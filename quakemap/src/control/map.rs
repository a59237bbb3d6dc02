use super::{EventPropagation, UserEvent, UserEventHandler};
use crate::geo::Point2;
use crate::map::Map;
use crate::view::MapView;

/// Configuration of a [`MapController`]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MapControllerConfiguration {
    scroll_px_per_zoom_level: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for MapControllerConfiguration {
    fn default() -> Self {
        Self {
            scroll_px_per_zoom_level: 60.0,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }
}

impl MapControllerConfiguration {
    /// Number of scrolled pixels that change the zoom by one level.
    pub fn scroll_px_per_zoom_level(&self) -> f64 {
        self.scroll_px_per_zoom_level
    }

    /// Sets number of scrolled pixels that change the zoom by one level. Smaller values zoom
    /// faster.
    pub fn with_scroll_px_per_zoom_level(mut self, pixels: f64) -> Self {
        self.scroll_px_per_zoom_level = pixels;
        self
    }

    /// Minimum allowed zoom level.
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Sets minimum allowed zoom level.
    pub fn with_min_zoom(mut self, zoom: f64) -> Self {
        self.min_zoom = zoom;
        self
    }

    /// Maximum allowed zoom level.
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Sets maximum allowed zoom level.
    pub fn with_max_zoom(mut self, zoom: f64) -> Self {
        self.max_zoom = zoom;
        self
    }
}

/// Event handler that pans the map by dragging and zooms it with the mouse wheel, pinch
/// gestures and double clicks.
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct MapController {
    config: MapControllerConfiguration,
}

impl MapController {
    /// Creates a new controller.
    pub fn new(config: MapControllerConfiguration) -> Self {
        Self { config }
    }

    /// Configuration of the controller.
    pub fn config(&self) -> MapControllerConfiguration {
        self.config
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.config.min_zoom, self.config.max_zoom)
    }

    fn zoom_view(&self, view: &MapView, delta: f64, anchor: &Point2) -> MapView {
        view.zoom_around(self.clamp_zoom(view.zoom() + delta), anchor)
    }
}

impl UserEventHandler for MapController {
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::Drag { dx, dy } => {
                let target = map.view().translate(*dx, *dy);
                map.set_view(target);
                EventPropagation::Stop
            }
            UserEvent::Scroll(pixels, pointer) => {
                if self.config.scroll_px_per_zoom_level <= 0.0 {
                    return EventPropagation::Propagate;
                }

                let delta = pixels / self.config.scroll_px_per_zoom_level;
                let target = self.zoom_view(map.view(), delta, pointer);
                map.set_view(target);
                EventPropagation::Stop
            }
            UserEvent::Zoom(delta, center) => {
                let target = self.zoom_view(map.view(), *delta, center);
                map.set_view(target);
                EventPropagation::Stop
            }
            UserEvent::DoubleClick(position) => {
                let target = self.zoom_view(map.view(), 1.0, position);
                map.set_view(target);
                EventPropagation::Stop
            }
            UserEvent::Click(_) => EventPropagation::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geo::Size;
    use crate::latlon;

    fn map() -> Map {
        let mut map = Map::new(MapView::new(&latlon!(0.0, 0.0), 5.0), vec![], None);
        map.set_size(Size::new(400.0, 400.0));
        map
    }

    #[test]
    fn drag_pans_the_map() {
        let mut map = map();
        let grabbed = map.view().screen_to_map(&Point2::new(100.0, 100.0));

        let result =
            MapController::default().handle(&UserEvent::Drag { dx: 10.0, dy: 20.0 }, &mut map);
        assert_eq!(result, EventPropagation::Stop);

        let now_at = map.view().map_to_screen(&grabbed);
        assert_abs_diff_eq!(now_at.x, 110.0, epsilon = 1e-6);
        assert_abs_diff_eq!(now_at.y, 120.0, epsilon = 1e-6);
    }

    #[test]
    fn scroll_zooms_around_pointer() {
        let mut map = map();
        let controller = MapController::default();
        let pointer = Point2::new(300.0, 50.0);
        let fixed = map.view().screen_to_map(&pointer);

        controller.handle(&UserEvent::Scroll(60.0, pointer), &mut map);
        assert_abs_diff_eq!(map.view().zoom(), 6.0, epsilon = 1e-9);

        let now_at = map.view().map_to_screen(&fixed);
        assert_abs_diff_eq!(now_at.x, pointer.x, epsilon = 1e-6);
        assert_abs_diff_eq!(now_at.y, pointer.y, epsilon = 1e-6);

        controller.handle(&UserEvent::Scroll(-30.0, pointer), &mut map);
        assert_abs_diff_eq!(map.view().zoom(), 5.5, epsilon = 1e-9);
    }

    #[test]
    fn zoom_is_limited() {
        let mut map = map();
        let controller = MapController::new(
            MapControllerConfiguration::default()
                .with_min_zoom(2.0)
                .with_max_zoom(6.0),
        );
        let center = Point2::new(200.0, 200.0);

        controller.handle(&UserEvent::Zoom(10.0, center), &mut map);
        assert_eq!(map.view().zoom(), 6.0);

        controller.handle(&UserEvent::Zoom(-10.0, center), &mut map);
        assert_eq!(map.view().zoom(), 2.0);
    }

    #[test]
    fn double_click_zooms_in() {
        let mut map = map();
        MapController::default().handle(&UserEvent::DoubleClick(Point2::new(1.0, 1.0)), &mut map);
        assert_eq!(map.view().zoom(), 6.0);
    }

    #[test]
    fn click_is_propagated() {
        let mut map = map();
        let before = *map.view();
        let result =
            MapController::default().handle(&UserEvent::Click(Point2::new(1.0, 1.0)), &mut map);

        assert_eq!(result, EventPropagation::Propagate);
        assert_eq!(*map.view(), before);
    }
}
