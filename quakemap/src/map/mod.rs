//! The [`Map`] value and its assembly.

use crate::control::{LayerControl, LegendControl};
use crate::geo::{Point2, Size};
use crate::layer::{Layer, MarkerLayer};
use crate::marker::Marker;
use crate::messenger::Messenger;
use crate::render::Canvas;
use crate::view::MapView;

mod builder;
mod layer_collection;

pub use builder::{
    compose_map, MapBuilder, DEFAULT_CENTER, DEFAULT_ZOOM, EARTHQUAKES_NAME, STREET_MAP_NAME,
    STREET_MAP_URL, TOPOGRAPHIC_MAP_NAME, TOPOGRAPHIC_MAP_URL,
};
pub use layer_collection::LayerCollection;

/// Map specifies a set of layers, the view that should be rendered and the controls shown over
/// it.
pub struct Map {
    view: MapView,
    layers: LayerCollection,
    layer_control: Option<LayerControl>,
    legend: Option<LegendControl>,
    messenger: Option<Box<dyn Messenger>>,
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("view", &self.view)
            .field("layers", &self.layers.len())
            .field("layer_control", &self.layer_control)
            .field("legend", &self.legend)
            .finish()
    }
}

impl Map {
    /// Creates a new map without controls.
    pub fn new(
        view: MapView,
        layers: Vec<Box<dyn Layer>>,
        messenger: Option<Box<dyn Messenger + 'static>>,
    ) -> Self {
        Self {
            view,
            layers: layers.into(),
            layer_control: None,
            legend: None,
            messenger,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Returns the list of map's layers.
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Returns a mutable reference to the list of map's layers.
    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    /// Layer selection control, if the map has one.
    pub fn layer_control(&self) -> Option<&LayerControl> {
        self.layer_control.as_ref()
    }

    /// Mutable reference to the layer selection control.
    pub fn layer_control_mut(&mut self) -> Option<&mut LayerControl> {
        self.layer_control.as_mut()
    }

    /// Sets the layer selection control.
    pub fn set_layer_control(&mut self, control: Option<LayerControl>) {
        self.layer_control = control;
    }

    /// Legend control, if the map has one.
    pub fn legend(&self) -> Option<&LegendControl> {
        self.legend.as_ref()
    }

    /// Sets the legend control.
    pub fn set_legend(&mut self, legend: Option<LegendControl>) {
        self.legend = legend;
    }

    /// Switches the base layer through the layer control. Returns `false` if the map has no layer
    /// control or no such base layer.
    pub fn select_base_layer(&mut self, base: usize) -> bool {
        let Some(control) = &mut self.layer_control else {
            return false;
        };

        let changed = control.select_base(base, &mut self.layers);
        if changed {
            self.redraw();
        }

        changed
    }

    /// Switches an overlay on or off through the layer control. Returns `false` if the map has
    /// no layer control or no such overlay.
    pub fn set_overlay_visible(&mut self, overlay: usize, visible: bool) -> bool {
        let Some(control) = &self.layer_control else {
            return false;
        };

        let changed = control.set_overlay_visible(overlay, visible, &mut self.layers);
        if changed {
            self.redraw();
        }

        changed
    }

    /// Draws all visible layers in order.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for layer in self.layers.iter_visible() {
            layer.render(&self.view, canvas);
        }
    }

    /// Asks the visible layers to load the data for the current view, e.g. request missing tiles.
    pub fn load_layers(&self) {
        for layer in self.layers.iter_visible() {
            layer.prepare(&self.view);
        }
    }

    /// Finds the topmost visible marker under the screen position.
    pub fn marker_at(&self, position: &Point2) -> Option<&Marker> {
        let mut found = None;
        for layer in self.layers.iter_visible() {
            let Some(markers) = layer.as_any().downcast_ref::<MarkerLayer>() else {
                continue;
            };

            if let Some((_, marker)) = markers.marker_at(&self.view, position) {
                found = Some(marker);
            }
        }

        found
    }

    /// Whether the marker is in one of the visible marker layers.
    pub fn is_marker_visible(&self, marker: &Marker) -> bool {
        self.layers
            .iter_visible()
            .filter_map(|layer| layer.as_any().downcast_ref::<MarkerLayer>())
            .any(|markers| markers.markers().contains(marker))
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        self.redraw();
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Set the size of the map.
    pub fn set_size(&mut self, new_size: Size) {
        self.view = self.view.with_size(new_size);
    }

    /// Sets the new event messenger for the map.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = messenger.map(|m| Box::new(m) as Box<dyn Messenger>);
    }
}
