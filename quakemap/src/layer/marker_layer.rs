//! Overlay layer drawing earthquake markers.

use std::any::Any;

use super::{Attribution, Layer};
use crate::geo::Point2;
use crate::marker::Marker;
use crate::messenger::Messenger;
use crate::render::Canvas;
use crate::view::MapView;

/// Draws a set of circle [markers](Marker) on top of the base layers.
///
/// Markers are drawn in the order they were given, so later markers cover earlier ones. The set
/// never changes after the layer is created.
#[derive(Debug, Default, Clone)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    /// Creates a layer with the given markers.
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// Markers of the layer in draw order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the layer has no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the topmost marker drawn under the given screen position, with its index.
    pub fn marker_at(&self, view: &MapView, position: &Point2) -> Option<(usize, &Marker)> {
        self.markers
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, marker)| marker.radius() > 0.0)
            .find(|(_, marker)| {
                let center = view.latlon_to_screen(&marker.position());
                center.distance(position) <= marker.radius() + marker.paint().stroke_width / 2.0
            })
    }
}

impl Layer for MarkerLayer {
    fn render(&self, view: &MapView, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        for marker in &self.markers {
            let center = view.latlon_to_screen(&marker.position());
            let reach = marker.radius().abs() + marker.paint().stroke_width;
            if center.x + reach < 0.0
                || center.y + reach < 0.0
                || center.x - reach > size.width()
                || center.y - reach > size.height()
            {
                continue;
            }

            canvas.draw_circle(center, marker.radius(), marker.paint());
        }
    }

    fn prepare(&self, _view: &MapView) {}

    fn set_messenger(&mut self, _messenger: Box<dyn Messenger>) {
        // Markers never change, so there is nothing to notify about.
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn attribution(&self) -> Option<Attribution> {
        None
    }
}
