//! Visual encoding of earthquakes: marker radius from magnitude and fill color from depth.
//!
//! Both functions are pure. The [depth legend](crate::legend) evaluates [`color_of_depth`] on its
//! own breakpoints, so the legend and the markers can never disagree.

use crate::Color;

/// Depth bands in descending order: a depth strictly greater than the threshold gets the color.
/// Depths not greater than the last threshold get [`SHALLOWEST_COLOR`].
pub const DEPTH_BANDS: [(f64, Color); 6] = [
    (90.0, Color::from_hex("#800026")),
    (70.0, Color::from_hex("#BD0026")),
    (50.0, Color::from_hex("#E31A1C")),
    (30.0, Color::from_hex("#FC4E2A")),
    (10.0, Color::from_hex("#FD8D3C")),
    (-10.0, Color::from_hex("#FEB24C")),
];

/// Color of events at or above 10 km of altitude (depth <= -10).
pub const SHALLOWEST_COLOR: Color = Color::from_hex("#FFEDA0");

/// Marker radius in pixels per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Fill color for an event at `depth` kilometers.
pub fn color_of_depth(depth: f64) -> Color {
    DEPTH_BANDS
        .iter()
        .find(|(threshold, _)| depth > *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(SHALLOWEST_COLOR)
}

/// Marker radius for an event of `magnitude`.
///
/// Not clamped: a negative magnitude gives a negative radius, which renders as nothing.
pub fn size_of_magnitude(magnitude: f64) -> f64 {
    magnitude * RADIUS_PER_MAGNITUDE
}

/// Paint of a circle marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CirclePaint {
    /// Fill color, opacity included.
    pub fill: Color,
    /// Outline color, opacity included.
    pub stroke: Color,
    /// Outline width in pixels.
    pub stroke_width: f64,
}

/// Outline width shared by all markers.
pub const MARKER_STROKE_WIDTH: f64 = 0.5;
/// Outline opacity shared by all markers.
pub const MARKER_STROKE_OPACITY: f32 = 1.0;
/// Fill opacity shared by all markers.
pub const MARKER_FILL_OPACITY: f32 = 0.8;
/// Outline color shared by all markers.
pub const MARKER_STROKE_COLOR: Color = Color::from_hex("#3388FF");

impl CirclePaint {
    /// Paint of an earthquake marker with the given fill color.
    pub fn marker(fill: Color) -> Self {
        Self {
            fill: fill.with_opacity(MARKER_FILL_OPACITY),
            stroke: MARKER_STROKE_COLOR.with_opacity(MARKER_STROKE_OPACITY),
            stroke_width: MARKER_STROKE_WIDTH,
        }
    }
}
