use std::ops::Index;

use crate::layer::Layer;

/// Ordered list of map layers with a visibility flag for each of them.
///
/// Layers are drawn from first to last. A hidden layer keeps its place in the collection and is
/// skipped when the map is rendered or prepared.
///
/// Layers are stored as trait objects; use [`Layer::as_any`] to get the concrete type back:
///
/// ```
/// use quakemap::layer::MarkerLayer;
/// use quakemap::LayerCollection;
///
/// let mut collection = LayerCollection::default();
/// collection.push(MarkerLayer::default());
/// collection.hide(0);
///
/// assert!(!collection.is_visible(0));
/// assert!(collection[0].as_any().downcast_ref::<MarkerLayer>().is_some());
/// ```
#[derive(Default)]
pub struct LayerCollection(Vec<LayerEntry>);

struct LayerEntry {
    layer: Box<dyn Layer>,
    is_hidden: bool,
}

impl LayerCollection {
    /// Adds the layer to the end of the collection. The layer is visible.
    pub fn push(&mut self, layer: impl Layer + 'static) {
        self.0.push(layer.into());
    }

    /// Number of layers, hidden ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Layer at `index`.
    pub fn get(&self, index: usize) -> Option<&dyn Layer> {
        self.0.get(index).map(|entry| &*entry.layer)
    }

    /// Mutable reference to the layer at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Box<dyn Layer>> {
        self.0.get_mut(index).map(|entry| &mut entry.layer)
    }

    /// Iterates over all layers, hidden ones included.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Layer> + '_ {
        self.0.iter().map(|entry| &*entry.layer)
    }

    /// Iterates over mutable references to all layers.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Layer>> + '_ {
        self.0.iter_mut().map(|entry| &mut entry.layer)
    }

    /// Iterates over the visible layers in draw order.
    pub fn iter_visible(&self) -> impl Iterator<Item = &dyn Layer> + '_ {
        self.0
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &*entry.layer)
    }

    /// Hides the layer at `index`. Does nothing if there is no such layer.
    pub fn hide(&mut self, index: usize) {
        if let Some(entry) = self.0.get_mut(index) {
            entry.is_hidden = true;
        }
    }

    /// Shows the layer at `index`. Does nothing if there is no such layer.
    pub fn show(&mut self, index: usize) {
        if let Some(entry) = self.0.get_mut(index) {
            entry.is_hidden = false;
        }
    }

    /// Whether the layer at `index` exists and is not hidden.
    pub fn is_visible(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|entry| !entry.is_hidden)
    }
}

impl Index<usize> for LayerCollection {
    type Output = dyn Layer;

    fn index(&self, index: usize) -> &Self::Output {
        &*self.0[index].layer
    }
}

impl<L: Into<LayerEntry>, T: IntoIterator<Item = L>> From<T> for LayerCollection {
    fn from(value: T) -> Self {
        Self(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Layer + 'static> From<T> for LayerEntry {
    fn from(value: T) -> Self {
        Self {
            layer: Box::new(value),
            is_hidden: false,
        }
    }
}

impl From<Box<dyn Layer>> for LayerEntry {
    fn from(value: Box<dyn Layer>) -> Self {
        Self {
            layer: value,
            is_hidden: false,
        }
    }
}
