//! Turning feed features into circle markers.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::feed::EarthquakeFeature;
use crate::geo::LatLon;
use crate::layer::MarkerLayer;
use crate::style::{color_of_depth, size_of_magnitude, CirclePaint};
use crate::Color;

/// Popup title of an event without a place.
pub const UNKNOWN_PLACE: &str = "Unknown location";

/// Popup time of an event without a valid timestamp.
pub const INVALID_DATE: &str = "Invalid Date";

/// Shape of the popup time: `Tue Nov 14 2023 22:13:20 GMT+0000`.
const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Formats milliseconds since the epoch in the given time zone.
///
/// ```
/// use quakemap::marker::format_event_time;
///
/// assert_eq!(
///     format_event_time(Some(1_700_000_000_000), &chrono::Utc),
///     "Tue Nov 14 2023 22:13:20 GMT+0000"
/// );
/// assert_eq!(format_event_time(None, &chrono::Utc), "Invalid Date");
/// ```
pub fn format_event_time<Tz: TimeZone>(millis: Option<i64>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match millis.and_then(DateTime::<Utc>::from_timestamp_millis) {
        Some(time) => time.with_timezone(tz).format(TIME_FORMAT).to_string(),
        None => INVALID_DATE.to_owned(),
    }
}

/// Text shown when a marker is clicked: the place as a heading and the event time below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    title: String,
    time: String,
}

impl Popup {
    /// Creates a popup.
    pub fn new(title: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            time: time.into(),
        }
    }

    /// Heading of the popup.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Formatted event time.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Popup content as HTML. The text is inserted as is.
    pub fn to_html(&self) -> String {
        format!("<h3>{}</h3><hr><p>{}</p>", self.title, self.time)
    }
}

/// Circle marker of one earthquake.
///
/// Radius is in screen pixels and does not change with zoom. A negative magnitude gives a
/// negative radius, which is kept as is and draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    position: LatLon,
    radius: f64,
    paint: CirclePaint,
    popup: Popup,
}

impl Marker {
    /// Creates a marker for the feature with the popup time in the viewer's local time zone.
    pub fn from_feature(feature: &EarthquakeFeature) -> Self {
        Self::from_feature_in(feature, &Local)
    }

    /// Creates a marker for the feature with the popup time in the given time zone.
    pub fn from_feature_in<Tz: TimeZone>(feature: &EarthquakeFeature, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        // Missing values fall through the same comparisons an undefined value would.
        let radius = feature.magnitude.map(size_of_magnitude).unwrap_or(0.0);
        let fill = color_of_depth(feature.depth.unwrap_or(f64::NAN));

        Self {
            position: LatLon::new(feature.latitude, feature.longitude),
            radius,
            paint: CirclePaint::marker(fill),
            popup: Popup::new(
                feature.place.as_deref().unwrap_or(UNKNOWN_PLACE),
                format_event_time(feature.time, tz),
            ),
        }
    }

    /// Geographic position of the event.
    pub fn position(&self) -> LatLon {
        self.position
    }

    /// Radius in pixels.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fill color without the fill opacity applied.
    pub fn fill_color(&self) -> Color {
        self.paint.fill.with_opacity(1.0)
    }

    /// Paint the circle is drawn with.
    pub fn paint(&self) -> &CirclePaint {
        &self.paint
    }

    /// Popup of the marker.
    pub fn popup(&self) -> &Popup {
        &self.popup
    }
}

/// Builds the marker overlay: one marker per feature, in feed order.
pub fn build_marker_layer(features: &[EarthquakeFeature]) -> MarkerLayer {
    build_marker_layer_in(features, &Local)
}

/// Same as [`build_marker_layer`] with popup times in the given time zone.
pub fn build_marker_layer_in<Tz: TimeZone>(features: &[EarthquakeFeature], tz: &Tz) -> MarkerLayer
where
    Tz::Offset: std::fmt::Display,
{
    MarkerLayer::new(
        features
            .iter()
            .map(|feature| Marker::from_feature_in(feature, tz))
            .collect(),
    )
}
