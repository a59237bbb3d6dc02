//! Controls shown over the map: layer selection, depth legend, marker popups and attributions.

use egui::{Align2, Frame, Id, RichText, Sense, Ui, Vec2};
use quakemap::control::{ControlPosition, LegendControl};
use quakemap::layer::Attribution;
use quakemap::marker::Popup;
use quakemap::Map;

use crate::canvas::to_color32;

const MARGIN: f32 = 10.0;
// Bottom controls are lifted above the attribution strip.
const BOTTOM_MARGIN: f32 = 40.0;
const SWATCH_SIZE: f32 = 18.0;

/// Screen anchor of a control in the given corner.
pub(crate) fn anchor(position: ControlPosition) -> (Align2, Vec2) {
    match position {
        ControlPosition::TopLeft => (Align2::LEFT_TOP, Vec2::new(MARGIN, MARGIN)),
        ControlPosition::TopRight => (Align2::RIGHT_TOP, Vec2::new(-MARGIN, MARGIN)),
        ControlPosition::BottomLeft => (Align2::LEFT_BOTTOM, Vec2::new(MARGIN, -BOTTOM_MARGIN)),
        ControlPosition::BottomRight => {
            (Align2::RIGHT_BOTTOM, Vec2::new(-MARGIN, -BOTTOM_MARGIN))
        }
    }
}

enum LayerAction {
    SelectBase(usize),
    SetOverlay(usize, bool),
}

/// Shows the layer control window: radio buttons for base layers and checkboxes for overlays.
pub(crate) fn layer_control(ctx: &egui::Context, map: &mut Map) {
    let Some(control) = map.layer_control() else {
        return;
    };

    let bases: Vec<(String, bool)> = control
        .base_layers()
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.name().to_owned(), control.active_base() == Some(i)))
        .collect();
    let overlays: Vec<(String, bool)> = control
        .overlays()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let visible = control.is_overlay_visible(i, map.layers());
            (entry.name().to_owned(), visible)
        })
        .collect();
    let (align, offset) = anchor(control.position());

    let mut action = None;
    let response = egui::Window::new("Layers")
        .id(Id::new("quakemap_layer_control"))
        .anchor(align, offset)
        .resizable(false)
        .default_open(!control.is_collapsed())
        .show(ctx, |ui| {
            for (i, (name, active)) in bases.iter().enumerate() {
                if ui.radio(*active, name.as_str()).clicked() && !active {
                    action = Some(LayerAction::SelectBase(i));
                }
            }

            if !bases.is_empty() && !overlays.is_empty() {
                ui.separator();
            }

            for (i, (name, visible)) in overlays.iter().enumerate() {
                let mut checked = *visible;
                if ui.checkbox(&mut checked, name.as_str()).changed() {
                    action = Some(LayerAction::SetOverlay(i, checked));
                }
            }
        });

    match action {
        Some(LayerAction::SelectBase(base)) => {
            map.select_base_layer(base);
        }
        Some(LayerAction::SetOverlay(overlay, visible)) => {
            map.set_overlay_visible(overlay, visible);
        }
        None => {}
    }

    if let (Some(response), Some(control)) = (response, map.layer_control_mut()) {
        control.set_collapsed(response.inner.is_none());
    }
}

/// Shows the depth legend: a color swatch and a depth range per line.
pub(crate) fn legend(ctx: &egui::Context, legend: &LegendControl) {
    let (align, offset) = anchor(legend.position());

    egui::Area::new(Id::new("quakemap_legend"))
        .anchor(align, offset)
        .interactable(false)
        .show(ctx, |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                for entry in legend.entries() {
                    ui.horizontal(|ui| {
                        let (swatch, _) = ui
                            .allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::hover());
                        ui.painter()
                            .rect_filled(swatch, 0.0, to_color32(entry.color));
                        ui.label(entry.label());
                    });
                }
            });
        });
}

/// Contents of a marker popup. Sets `open` to `false` when the close button is clicked.
pub(crate) fn popup(ui: &mut Ui, popup: &Popup, open: &mut bool) {
    Frame::popup(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(popup.title()).heading());
            if ui.small_button("×").clicked() {
                *open = false;
            }
        });
        ui.separator();
        ui.label(popup.time());
    });
}

/// Shows attributions of the visible layers in the bottom right corner.
pub(crate) fn attributions(ctx: &egui::Context, attributions: &[Attribution]) {
    if attributions.is_empty() {
        return;
    }

    egui::Window::new("Attributions")
        .id(Id::new("quakemap_attributions"))
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(Align2::RIGHT_BOTTOM, [-MARGIN, -MARGIN])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (i, attribution) in attributions.iter().enumerate() {
                    if i > 0 {
                        ui.label(" | ");
                    }

                    match attribution.url() {
                        Some(url) => {
                            ui.hyperlink_to(attribution.text(), url);
                        }
                        None => {
                            ui.label(attribution.text());
                        }
                    }
                }
            });
        });
}
