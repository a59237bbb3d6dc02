use super::ControlPosition;
use crate::map::LayerCollection;

/// Named reference to a layer in the map's [`LayerCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEntry {
    name: String,
    layer_index: usize,
}

impl ControlEntry {
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, layer_index: usize) -> Self {
        Self {
            name: name.into(),
            layer_index,
        }
    }

    /// Name shown to the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the layer in the collection.
    pub fn layer_index(&self) -> usize {
        self.layer_index
    }
}

/// Layer selection control.
///
/// Base layers are mutually exclusive: exactly one of them is visible once one is selected.
/// Overlays are switched on and off independently. The control only remembers which layers it
/// manages, the visibility itself lives in the [`LayerCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerControl {
    base_layers: Vec<ControlEntry>,
    overlays: Vec<ControlEntry>,
    active_base: Option<usize>,
    collapsed: bool,
    position: ControlPosition,
}

impl LayerControl {
    /// Creates a control. No base layer is marked active until [`LayerControl::select_base`] is
    /// called.
    pub fn new(base_layers: Vec<ControlEntry>, overlays: Vec<ControlEntry>) -> Self {
        Self {
            base_layers,
            overlays,
            active_base: None,
            collapsed: true,
            position: ControlPosition::TopRight,
        }
    }

    /// Sets whether the control starts collapsed.
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Sets the corner the control is shown in.
    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    /// Base layer choices in display order.
    pub fn base_layers(&self) -> &[ControlEntry] {
        &self.base_layers
    }

    /// Overlay choices in display order.
    pub fn overlays(&self) -> &[ControlEntry] {
        &self.overlays
    }

    /// Index of the selected base layer in [`LayerControl::base_layers`].
    pub fn active_base(&self) -> Option<usize> {
        self.active_base
    }

    /// Whether the control is collapsed into a button.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Expands or collapses the control.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Corner the control is shown in.
    pub fn position(&self) -> ControlPosition {
        self.position
    }

    /// Shows the chosen base layer and hides the other ones. Returns `false` if there is no such
    /// base layer.
    pub fn select_base(&mut self, base: usize, layers: &mut LayerCollection) -> bool {
        if base >= self.base_layers.len() {
            return false;
        }

        for (i, entry) in self.base_layers.iter().enumerate() {
            if i == base {
                layers.show(entry.layer_index);
            } else {
                layers.hide(entry.layer_index);
            }
        }

        self.active_base = Some(base);
        true
    }

    /// Switches an overlay on or off. Returns `false` if there is no such overlay.
    pub fn set_overlay_visible(
        &self,
        overlay: usize,
        visible: bool,
        layers: &mut LayerCollection,
    ) -> bool {
        let Some(entry) = self.overlays.get(overlay) else {
            return false;
        };

        if visible {
            layers.show(entry.layer_index);
        } else {
            layers.hide(entry.layer_index);
        }

        true
    }

    /// Whether the overlay is currently shown.
    pub fn is_overlay_visible(&self, overlay: usize, layers: &LayerCollection) -> bool {
        self.overlays
            .get(overlay)
            .is_some_and(|entry| layers.is_visible(entry.layer_index))
    }
}
