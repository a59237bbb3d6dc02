#![allow(dead_code)]

use quakemap::decoded_image::DecodedImage;
use quakemap::geo::{Point2, Rect, Size};
use quakemap::render::Canvas;
use quakemap::style::CirclePaint;

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
    pub paint: CirclePaint,
}

/// Canvas that records drawn circles and image keys.
#[derive(Debug)]
pub struct RecordingCanvas {
    size: Size,
    pub circles: Vec<Circle>,
    pub images: Vec<(String, Rect)>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            circles: vec![],
            images: vec![],
        }
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn draw_image(&mut self, key: &str, _image: &DecodedImage, bounds: Rect) {
        self.images.push((key.to_owned(), bounds));
    }

    fn draw_circle(&mut self, center: Point2, radius: f64, paint: &CirclePaint) {
        self.circles.push(Circle {
            center,
            radius,
            paint: *paint,
        });
    }
}

pub fn feed_with(features: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "type": "FeatureCollection",
        "metadata": {"title": "USGS All Earthquakes, Past Month"},
        "features": features,
    })
    .to_string()
}

pub fn quake(mag: f64, lon: f64, lat: f64, depth: f64, place: &str, time: i64) -> serde_json::Value {
    serde_json::json!({
        "type": "Feature",
        "properties": {"mag": mag, "place": place, "time": time},
        "geometry": {"type": "Point", "coordinates": [lon, lat, depth]},
    })
}
