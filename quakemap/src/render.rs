//! Rendering seam between the map engine and a front-end.
//!
//! Layers do not know what draws them: they convert their content into screen coordinates and
//! call [`Canvas`] methods. The egui front-end implements the canvas with the egui painter.

use crate::decoded_image::DecodedImage;
use crate::geo::{Point2, Rect, Size};
use crate::style::CirclePaint;

/// A surface the map is drawn onto. All coordinates are screen pixels with the origin at the top
/// left corner.
pub trait Canvas {
    /// Size of the canvas in pixels.
    fn size(&self) -> Size;

    /// Draws an image stretched over `bounds`.
    ///
    /// `key` identifies the image content. A canvas may use it to keep the uploaded image between
    /// frames: the same key always comes with the same pixels.
    fn draw_image(&mut self, key: &str, image: &DecodedImage, bounds: Rect);

    /// Draws a filled and stroked circle. Circles with non-positive radius are not drawn.
    fn draw_circle(&mut self, center: Point2, radius: f64, paint: &CirclePaint);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// One recorded canvas call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum DrawCall {
        Image { key: String, bounds: Rect },
        Circle { center: Point2, radius: f64, paint: CirclePaint },
    }

    /// Canvas that remembers what was drawn on it.
    #[derive(Debug)]
    pub(crate) struct RecordingCanvas {
        pub(crate) size: Size,
        pub(crate) calls: Vec<DrawCall>,
    }

    impl RecordingCanvas {
        pub(crate) fn new(width: f64, height: f64) -> Self {
            Self {
                size: Size::new(width, height),
                calls: vec![],
            }
        }

        pub(crate) fn circles(&self) -> Vec<(Point2, f64, CirclePaint)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    DrawCall::Circle {
                        center,
                        radius,
                        paint,
                    } => Some((*center, *radius, *paint)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> Size {
            self.size
        }

        fn draw_image(&mut self, key: &str, _image: &DecodedImage, bounds: Rect) {
            self.calls.push(DrawCall::Image {
                key: key.to_owned(),
                bounds,
            });
        }

        fn draw_circle(&mut self, center: Point2, radius: f64, paint: &CirclePaint) {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                paint: *paint,
            });
        }
    }
}
