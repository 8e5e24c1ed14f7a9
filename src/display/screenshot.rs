use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use log::info;

use super::{Color, PixelBuffer};
use crate::error::{CanvasError, Result};

impl PixelBuffer {
    /// Row-major RGBA8 bytes, top row first, alpha forced to 0xFF
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels().len() * 4);
        for &argb in self.pixels() {
            bytes.extend_from_slice(&Color(argb).to_opaque_rgba());
        }
        bytes
    }

    /// Copy into an `image` buffer for encoding
    pub fn to_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width(), self.height(), self.to_rgba_bytes()).ok_or(
            CanvasError::Dimensions {
                width: self.width(),
                height: self.height(),
            },
        )
    }

    /// Encode the canvas as an in-memory PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.to_image()?
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Write the canvas to a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_image()?.save_with_format(path, ImageFormat::Png)?;
        info!(
            "screenshot {}x{} saved to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_reorder_and_opaque_alpha() {
        let mut buffer = PixelBuffer::with_size(2, 1);
        buffer.pset(0, 0, Color(0xFF12_3456));
        buffer.pset(1, 0, Color(0x40AB_CDEF));
        assert_eq!(
            buffer.to_rgba_bytes(),
            vec![0x12, 0x34, 0x56, 0xFF, 0x2A, 0x33, 0x3B, 0xFF]
        );
    }

    #[test]
    fn test_rows_are_top_to_bottom() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.pset(1, 1, Color::RED);
        buffer.pset(0, 0, Color::BLUE);
        let bytes = buffer.to_rgba_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &[0, 0, 0xFF, 0xFF]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0xFF]);
        assert_eq!(&bytes[12..16], &[0xFF, 0, 0, 0xFF]);
    }

    #[test]
    fn test_image_matches_buffer() {
        let mut buffer = PixelBuffer::with_size(3, 2);
        buffer.clear(Color::BLACK);
        buffer.pset(2, 1, Color::GREEN);
        let image = buffer.to_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [0, 0xFF, 0, 0xFF]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0xFF]);
    }

    #[test]
    fn test_encode_png_signature() {
        let mut buffer = PixelBuffer::with_size(4, 4);
        buffer.clear(Color::WHITE);
        let png = buffer.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
