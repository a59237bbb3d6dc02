//! Interactivity of the map and the on-screen controls.
//!
//! A front-end converts its input into [`UserEvent`]s and gives them to [`UserEventHandler`]s,
//! e.g. the [`MapController`] that pans and zooms the map. The [`LayerControl`] and the
//! [`LegendControl`] describe what the front-end shows over the map and where.

use crate::geo::Point2;
use crate::map::Map;

mod layer_control;
mod legend_control;
mod map;

pub use layer_control::{ControlEntry, LayerControl};
pub use legend_control::LegendControl;
pub use map::{MapController, MapControllerConfiguration};

/// User input handler.
pub trait UserEventHandler {
    /// Handle the event.
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation;
}

/// User interaction event, in screen pixels from the top left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserEvent {
    /// Primary button was clicked at the position.
    Click(Point2),
    /// Primary button was double clicked at the position.
    DoubleClick(Point2),
    /// Pointer moved by the given amount of pixels while a button was held.
    Drag {
        /// Horizontal movement.
        dx: f64,
        /// Vertical movement, positive is down.
        dy: f64,
    },
    /// Mouse wheel or touch pad scroll by the given amount of pixels around the pointer position.
    /// Positive values scroll up, which zooms in.
    Scroll(f64, Point2),
    /// Pinch gesture: the zoom level changes by the given amount around the position.
    Zoom(f64, Point2),
}

/// Value returned by an [`UserEventHandler`] to indicate the status of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
}

/// Corner of the map a control is anchored to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    #[default]
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}
