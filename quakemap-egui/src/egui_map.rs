use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use egui::{Align2, Id, Pos2, Response, Sense, Ui, Vec2};
use quakemap::control::{EventPropagation, MapController, UserEvent, UserEventHandler};
use quakemap::geo::{Point2, Size};
use quakemap::layer::Attribution;
use quakemap::marker::Marker;
use quakemap::{Map, Messenger};

use crate::canvas::{EguiCanvas, TextureCache};
use crate::controls;

// Gap between a marker and the bottom of its popup.
const POPUP_GAP: f32 = 4.0;

/// Options of the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EguiMapOptions {
    /// Show the layer control and the legend of the map.
    pub show_controls: bool,
    /// Show the attributions of the visible layers.
    pub show_attributions: bool,
}

impl Default for EguiMapOptions {
    fn default() -> Self {
        Self {
            show_controls: true,
            show_attributions: true,
        }
    }
}

/// State of the map widget that persists between frames.
pub struct EguiMapState {
    map: Map,
    handlers: Vec<Box<dyn UserEventHandler>>,
    requires_redraw: Arc<AtomicBool>,
    textures: TextureCache,
    popup: Option<Marker>,
    options: EguiMapOptions,
}

impl EguiMapState {
    /// Takes ownership of the map and connects it to the egui context.
    ///
    /// Events are given to `handlers` first and then to the default [`MapController`].
    pub fn new(
        mut map: Map,
        ctx: egui::Context,
        handlers: impl IntoIterator<Item = Box<dyn UserEventHandler>>,
        options: EguiMapOptions,
    ) -> Self {
        let requires_redraw = Arc::new(AtomicBool::new(true));
        let messenger = MapStateMessenger {
            context: ctx,
            requires_redraw: requires_redraw.clone(),
        };

        map.set_messenger(Some(messenger.clone()));
        for layer in map.layers_mut().iter_mut() {
            layer.set_messenger(Box::new(messenger.clone()));
        }

        let mut handlers: Vec<Box<dyn UserEventHandler>> = handlers.into_iter().collect();
        handlers.push(Box::new(MapController::default()));

        Self {
            map,
            handlers,
            requires_redraw,
            textures: TextureCache::default(),
            popup: None,
            options,
        }
    }

    /// Marks the map as changed, so that the layers load data for the current view during the
    /// next frame.
    pub fn request_redraw(&self) {
        self.requires_redraw.store(true, Ordering::Relaxed);
    }

    /// Draws the map into all the space available in the ui, together with its controls.
    pub fn render(&mut self, ui: &mut Ui) {
        let available_size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(available_size, Sense::click_and_drag());

        let size = Size::new(rect.width() as f64, rect.height() as f64);
        if self.map.view().size() != size {
            self.map.set_size(size);
            self.request_redraw();
        }

        for event in collect_events(ui, &response, rect) {
            self.handle_event(event);
        }

        if self.requires_redraw.swap(false, Ordering::Relaxed) {
            log::trace!("Loading layers for {:?}", self.map.view());
            self.map.load_layers();
        }

        self.draw(ui, rect);

        let ctx = ui.ctx().clone();
        if self.options.show_controls {
            controls::layer_control(&ctx, &mut self.map);
            if let Some(legend) = self.map.legend() {
                controls::legend(&ctx, legend);
            }
        }

        if let Some(marker) = &self.popup {
            if !self.map.is_marker_visible(marker) {
                self.popup = None;
            }
        }

        self.show_popup(&ctx, rect);

        if self.options.show_attributions {
            controls::attributions(&ctx, &self.collect_attributions());
        }
    }

    fn draw(&mut self, ui: &Ui, rect: egui::Rect) {
        let painter = ui.painter_at(rect);
        let mut canvas = EguiCanvas::new(ui.ctx(), &painter, &mut self.textures, rect);
        self.map.render(&mut canvas);
        self.textures.end_frame();
    }

    fn handle_event(&mut self, event: UserEvent) {
        for handler in &self.handlers {
            if handler.handle(&event, &mut self.map) == EventPropagation::Stop {
                return;
            }
        }

        if let UserEvent::Click(position) = event {
            self.popup = self.map.marker_at(&position).cloned();
        }
    }

    fn show_popup(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        let Some(marker) = &self.popup else {
            return;
        };

        let anchor = self.map.view().latlon_to_screen(&marker.position());
        let position = rect.min + Vec2::new(anchor.x as f32, anchor.y as f32)
            - Vec2::new(0.0, marker.radius().max(0.0) as f32 + POPUP_GAP);
        if !rect.contains(position) {
            return;
        }

        let mut open = true;
        egui::Area::new(Id::new("quakemap_popup"))
            .fixed_pos(position)
            .pivot(Align2::CENTER_BOTTOM)
            .show(ctx, |ui| controls::popup(ui, marker.popup(), &mut open));

        if !open {
            self.popup = None;
        }
    }

    /// Attributions of the visible layers, in layer order.
    pub fn collect_attributions(&self) -> Vec<Attribution> {
        self.map
            .layers()
            .iter_visible()
            .filter_map(|layer| layer.attribution())
            .collect()
    }

    /// Marker whose popup is currently open.
    pub fn popup(&self) -> Option<&Marker> {
        self.popup.as_ref()
    }

    /// The map.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable reference to the map.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }
}

/// Converts egui input over the map widget into map events. Positions are relative to the top
/// left corner of the widget.
fn collect_events(ui: &Ui, response: &Response, rect: egui::Rect) -> Vec<UserEvent> {
    let to_map = |pos: Pos2| Point2::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
    let mut events = vec![];

    if response.dragged_by(egui::PointerButton::Primary) {
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            events.push(UserEvent::Drag {
                dx: delta.x as f64,
                dy: delta.y as f64,
            });
        }
    }

    if let Some(pointer) = response.hover_pos() {
        let (scroll, zoom) = ui.input(|input| (input.smooth_scroll_delta.y, input.zoom_delta()));
        if scroll != 0.0 {
            events.push(UserEvent::Scroll(scroll as f64, to_map(pointer)));
        }

        if zoom != 1.0 {
            events.push(UserEvent::Zoom((zoom as f64).log2(), to_map(pointer)));
        }
    }

    if let Some(pointer) = response.interact_pointer_pos() {
        if response.double_clicked() {
            events.push(UserEvent::DoubleClick(to_map(pointer)));
        } else if response.clicked() {
            events.push(UserEvent::Click(to_map(pointer)));
        }
    }

    events
}

#[derive(Clone)]
struct MapStateMessenger {
    context: egui::Context,
    requires_redraw: Arc<AtomicBool>,
}

impl Messenger for MapStateMessenger {
    fn request_redraw(&self) {
        self.requires_redraw.store(true, Ordering::Relaxed);
        self.context.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use egui::epaint::Shape;
    use egui::{Event, Modifiers, PointerButton, RawInput};
    use quakemap::feed::EarthquakeFeature;
    use quakemap::marker::build_marker_layer_in;
    use quakemap::MapBuilder;

    use super::*;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    fn state_with_marker() -> (egui::Context, EguiMapState) {
        state_with_handlers(vec![])
    }

    fn state_with_handlers(
        handlers: Vec<Box<dyn UserEventHandler>>,
    ) -> (egui::Context, EguiMapState) {
        let feature = EarthquakeFeature {
            place: Some("Center".to_owned()),
            time: Some(1_700_000_000_000),
            magnitude: Some(5.0),
            longitude: 10.0,
            latitude: 20.0,
            depth: Some(45.0),
        };
        let map = MapBuilder::default()
            .with_latlon(20.0, 10.0)
            .with_zoom(5.0)
            .with_overlay("Earthquakes", build_marker_layer_in(&[feature], &chrono::Utc))
            .build();

        let ctx = egui::Context::default();
        let state = EguiMapState::new(map, ctx.clone(), handlers, EguiMapOptions::default());
        (ctx, state)
    }

    fn run_frame(
        ctx: &egui::Context,
        state: &mut EguiMapState,
        events: Vec<Event>,
    ) -> egui::FullOutput {
        let input = RawInput {
            screen_rect: Some(egui::Rect::from_min_size(Pos2::ZERO, SCREEN)),
            events,
            ..Default::default()
        };

        ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| state.render(ui));
        })
    }

    fn button(pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(400.0, 300.0),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn markers_are_painted_as_circles() {
        let (ctx, mut state) = state_with_marker();
        let output = run_frame(&ctx, &mut state, vec![]);

        let circles: Vec<_> = output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                Shape::Circle(circle) if (circle.radius - 25.0).abs() < 1e-3 => Some(circle),
                _ => None,
            })
            .collect();

        assert_eq!(circles.len(), 1);
        assert_abs_diff_eq!(circles[0].center.x, 400.0, epsilon = 1.0);
        assert_abs_diff_eq!(circles[0].center.y, 300.0, epsilon = 1.0);
    }

    #[test]
    fn map_takes_the_size_of_the_panel() {
        let (ctx, mut state) = state_with_marker();
        run_frame(&ctx, &mut state, vec![]);

        let size = state.map().view().size();
        assert!(size.width() > 700.0 && size.width() <= 800.0);
        assert!(size.height() > 500.0 && size.height() <= 600.0);
    }

    fn click_center(ctx: &egui::Context, state: &mut EguiMapState) {
        run_frame(ctx, state, vec![]);
        run_frame(
            ctx,
            state,
            vec![Event::PointerMoved(Pos2::new(400.0, 300.0)), button(true)],
        );
        run_frame(ctx, state, vec![button(false)]);
    }

    struct SwallowClicks;

    impl UserEventHandler for SwallowClicks {
        fn handle(&self, event: &UserEvent, _map: &mut Map) -> EventPropagation {
            match event {
                UserEvent::Click(_) => EventPropagation::Stop,
                _ => EventPropagation::Propagate,
            }
        }
    }

    #[test]
    fn click_on_marker_opens_popup() {
        let (ctx, mut state) = state_with_marker();
        click_center(&ctx, &mut state);

        let marker = state.popup().expect("popup is open");
        assert_eq!(marker.popup().title(), "Center");
    }

    #[test]
    fn popup_closes_when_overlay_is_hidden() {
        let (ctx, mut state) = state_with_marker();
        click_center(&ctx, &mut state);
        assert!(state.popup().is_some());

        assert!(state.map_mut().set_overlay_visible(0, false));
        run_frame(&ctx, &mut state, vec![]);
        assert!(state.popup().is_none());

        state.map_mut().set_overlay_visible(0, true);
        run_frame(&ctx, &mut state, vec![]);
        assert!(state.popup().is_none());
    }

    #[test]
    fn custom_handlers_run_first() {
        let (ctx, mut state) = state_with_handlers(vec![Box::new(SwallowClicks)]);
        click_center(&ctx, &mut state);

        assert!(state.popup().is_none());
    }

    #[test]
    fn layers_without_attribution_are_skipped() {
        let (_ctx, state) = state_with_marker();
        assert!(state.collect_attributions().is_empty());
    }
}
