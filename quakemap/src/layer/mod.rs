//! [Layers](Layer) specify a data source and the way the data should be rendered to the map.

use std::any::Any;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::messenger::Messenger;
use crate::render::Canvas;
use crate::view::MapView;

pub mod attribution;
pub mod marker_layer;
pub mod raster_tile_layer;

pub use attribution::Attribution;
pub use marker_layer::MarkerLayer;
pub use raster_tile_layer::RasterTileLayer;

/// Layers specify a data source and the way the data should be rendered to the map.
///
/// There are two types of layers:
/// * [`RasterTileLayer`] - downloads prerendered tiles from an Internet source and draws them as is.
/// * [`MarkerLayer`] - draws earthquake circles with popups.
pub trait Layer: MaybeSend + MaybeSync {
    /// Renders the layer to the given canvas.
    fn render(&self, view: &MapView, canvas: &mut dyn Canvas);
    /// Prepares the layer for rendering with the given `view`. The preparation may include data
    /// downloading or decoding which cannot be awaited for during render cycle.
    fn prepare(&self, view: &MapView);
    /// Sets the messenger for the layer. Messenger is used to notify the application when the
    /// layer thinks it should be updated on the screen.
    fn set_messenger(&mut self, messenger: Box<dyn Messenger>);
    /// A map stores layers as trait objects. This method can be used to convert the trait object
    /// into the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Mutable version of [`Layer::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Returns the attribution of the layer, if available.
    fn attribution(&self) -> Option<Attribution>;
}
