use std::collections::{HashMap, HashSet};

use egui::{Color32, ColorImage, Painter, Pos2, Stroke, TextureHandle, TextureOptions};
use quakemap::decoded_image::DecodedImage;
use quakemap::geo::{Point2, Rect, Size};
use quakemap::render::Canvas;
use quakemap::style::CirclePaint;
use quakemap::Color;

pub(crate) fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), color.a())
}

/// Textures uploaded for the images drawn on the map.
///
/// A texture survives as long as its image is drawn every frame. Images that were not drawn
/// during the last frame are released in [`TextureCache::end_frame`].
#[derive(Default)]
pub(crate) struct TextureCache {
    textures: HashMap<String, TextureHandle>,
    used: HashSet<String>,
}

impl TextureCache {
    fn get_or_upload(
        &mut self,
        ctx: &egui::Context,
        key: &str,
        image: &DecodedImage,
    ) -> &TextureHandle {
        self.used.insert(key.to_owned());
        self.textures.entry(key.to_owned()).or_insert_with(|| {
            log::trace!("Uploading texture {key}");
            let color_image = ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.bytes(),
            );
            ctx.load_texture(key, color_image, TextureOptions::LINEAR)
        })
    }

    pub(crate) fn end_frame(&mut self) {
        let used = &self.used;
        self.textures.retain(|key, _| used.contains(key));
        self.used.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }
}

/// [`Canvas`] drawing with the egui painter of the map widget.
pub(crate) struct EguiCanvas<'a> {
    ctx: &'a egui::Context,
    painter: &'a Painter,
    textures: &'a mut TextureCache,
    origin: Pos2,
    size: Size,
}

impl<'a> EguiCanvas<'a> {
    pub(crate) fn new(
        ctx: &'a egui::Context,
        painter: &'a Painter,
        textures: &'a mut TextureCache,
        rect: egui::Rect,
    ) -> Self {
        Self {
            ctx,
            painter,
            textures,
            origin: rect.min,
            size: Size::new(rect.width() as f64, rect.height() as f64),
        }
    }

    fn to_screen(&self, point: Point2) -> Pos2 {
        self.origin + egui::vec2(point.x as f32, point.y as f32)
    }
}

impl Canvas for EguiCanvas<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn draw_image(&mut self, key: &str, image: &DecodedImage, bounds: Rect) {
        let rect = egui::Rect::from_min_max(
            self.to_screen(Point2::new(bounds.x_min, bounds.y_min)),
            self.to_screen(Point2::new(bounds.x_max, bounds.y_max)),
        );
        let texture = self.textures.get_or_upload(self.ctx, key, image).id();
        let uv = egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        self.painter.image(texture, rect, uv, Color32::WHITE);
    }

    fn draw_circle(&mut self, center: Point2, radius: f64, paint: &CirclePaint) {
        if radius <= 0.0 {
            return;
        }

        self.painter.circle(
            self.to_screen(center),
            radius as f32,
            to_color32(paint.fill),
            Stroke::new(paint.stroke_width as f32, to_color32(paint.stroke)),
        );
    }
}
