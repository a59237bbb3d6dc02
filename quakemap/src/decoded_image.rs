//! Images loaded into memory, ready to be uploaded by a renderer.

use crate::error::QuakeMapError;
use crate::geo::Size;

/// An image that has been decoded into RGBA pixels.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decodes an image from a byte slice, guessing the format from the data. Non-RGBA images are
    /// converted to RGBA.
    pub fn decode(bytes: &[u8]) -> Result<Self, QuakeMapError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let dimensions = decoded.dimensions();

        Ok(Self {
            bytes: decoded.into_raw(),
            dimensions,
        })
    }

    /// Creates an image from raw RGBA bytes. Fails if the buffer does not match the dimensions.
    pub fn from_raw(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, QuakeMapError> {
        if bytes.len() != width as usize * height as usize * 4 {
            return Err(QuakeMapError::Generic(format!(
                "expected {} bytes for a {width}x{height} image, got {}",
                width as usize * height as usize * 4,
                bytes.len()
            )));
        }

        Ok(Self {
            bytes,
            dimensions: (width, height),
        })
    }

    /// RGBA pixels, row by row.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    /// Size of the image in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.dimensions.0 as f64, self.dimensions.1 as f64)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn decode_png() {
        let mut png = Vec::new();
        let pixels = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(
                &mut std::io::Cursor::new(&mut png),
                image::ImageOutputFormat::Png,
            )
            .unwrap();

        let decoded = DecodedImage::decode(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 3));
        assert_eq!(&decoded.bytes()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_an_error() {
        assert_matches!(
            DecodedImage::decode(b"not an image"),
            Err(QuakeMapError::ImageDecode(_))
        );
    }

    #[test]
    fn raw_size_mismatch() {
        assert!(DecodedImage::from_raw(vec![0; 16], 2, 2).is_ok());
        assert_matches!(
            DecodedImage::from_raw(vec![0; 15], 2, 2),
            Err(QuakeMapError::Generic(_))
        );
    }
}
