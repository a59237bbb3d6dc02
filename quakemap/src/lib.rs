//! Quakemap is a small map engine that shows recent earthquakes from the USGS GeoJSON feed on top
//! of switchable raster base maps.
//!
//! # Quick start
//!
//! The whole pipeline is a single awaited fetch followed by synchronous composition:
//!
//! ```no_run
//! # async fn run() -> Result<(), quakemap::error::QuakeMapError> {
//! let map = quakemap::load_earthquake_map().await?;
//! assert_eq!(map.layers().len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! The same result can be assembled step by step:
//!
//! * [`FeedFetcher`](feed::FeedFetcher) reads the feed and returns
//!   [earthquake features](feed::EarthquakeFeature) in server order,
//! * [`build_marker_layer`](marker::build_marker_layer) turns every feature into a circle
//!   [`Marker`](marker::Marker) sized by magnitude and colored by depth,
//! * [`compose_map`](map::compose_map) puts the markers over two base tile layers and attaches
//!   the [layer control](control::LayerControl) and the [depth legend](legend::DepthLegend).
//!
//! # Main components
//!
//! A [`Map`] holds the current [`MapView`] and a [`LayerCollection`]. [Layers](layer) know how to
//! load their data and how to draw it onto a [`Canvas`](render::Canvas). The engine itself does
//! not own a window: a front-end implements the canvas, forwards user input to the
//! [`MapController`](control::MapController) and shows the controls.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub(crate) mod async_runtime;
mod color;
pub mod control;
pub mod decoded_image;
pub mod error;
pub mod feed;
pub mod geo;
pub mod layer;
pub mod legend;
pub mod map;
pub mod marker;
mod messenger;
pub mod platform;
pub mod render;
pub mod style;
pub mod tile_schema;
mod view;

pub use color::Color;
pub use map::{compose_map, LayerCollection, Map, MapBuilder};
pub use messenger::Messenger;
pub use tile_schema::TileSchema;
pub use view::MapView;

use crate::error::QuakeMapError;
use crate::feed::{EarthquakeFeature, FeedFetcher};

/// Fetches the feed, builds the markers and composes the map.
///
/// Fails only if the feed cannot be read or decoded. Nothing is retried.
pub async fn load_earthquake_map() -> Result<Map, QuakeMapError> {
    let features = FeedFetcher::new().fetch().await?;
    Ok(earthquake_map(&features))
}

/// Builds the map for already fetched features.
pub fn earthquake_map(features: &[EarthquakeFeature]) -> Map {
    compose_map(marker::build_marker_layer(features))
}
