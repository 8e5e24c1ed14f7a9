use log::debug;

use super::{Color, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{CanvasError, Result};

// ============================================================================
// Compositing
// ============================================================================

/// Blend a single color channel: `(alpha*new + (255-alpha)*old) / 255`
///
/// Truncating division, not rounded. Existing output depends on it.
#[inline]
fn blend_channel(new: u32, old: u32, alpha: u32) -> u32 {
    (alpha * new + (255 - alpha) * old) / 255
}

/// Source-over blend of `src` onto the packed `dst` pixel.
/// The result carries the source alpha, it does not accumulate.
#[inline]
fn composite(src: Color, dst: u32) -> u32 {
    let alpha = src.alpha() as u32;
    let r = blend_channel(src.red() as u32, (dst >> 16) & 0xFF, alpha);
    let g = blend_channel(src.green() as u32, (dst >> 8) & 0xFF, alpha);
    let b = blend_channel(src.blue() as u32, dst & 0xFF, alpha);
    (alpha << 24) | (r << 16) | (g << 8) | b
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(CanvasError::Dimensions { width, height })
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Packed ARGB8888 framebuffer for software rendering
///
/// Every drawing primitive ends in [`PixelBuffer::pset`]. The buffer is the
/// drawing context: callers own it and pass it to every operation, so any
/// number of independent canvases can coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a pixel buffer with the default resolution (320x240)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a pixel buffer with a custom resolution, zeroed (transparent black)
    ///
    /// Aborts on allocation failure like any `Vec`; use
    /// [`PixelBuffer::try_with_size`] when the size comes from untrusted input.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Fallible constructor, reports overflow and allocation failure
    pub fn try_with_size(width: u32, height: u32) -> Result<Self> {
        let count = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(count)?;
        pixels.resize(count, 0);
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    /// Index of pixel (x, y); caller guarantees bounds
    #[inline]
    fn pixel_index(&self, x: i64, y: i64) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Write one pixel with clipping and alpha compositing
    ///
    /// - alpha 0 or out of bounds: no-op
    /// - alpha 0xFF: overwrite
    /// - otherwise: blend RGB against the current pixel, store source alpha
    #[inline]
    pub fn pset(&mut self, x: i64, y: i64, color: Color) {
        if color.is_transparent() || !self.in_bounds(x, y) {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx] = if color.is_opaque() {
            color.0
        } else {
            composite(color, self.pixels[idx])
        };
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(Color(self.pixels[self.pixel_index(x, y)]))
        } else {
            None
        }
    }

    /// Overwrite every pixel with `color`, alpha included. No blending.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.0);
    }

    /// Reallocate to `width x height` and fill with `clear`
    ///
    /// Dimensions and storage change together or not at all: on error the
    /// buffer keeps its previous size and contents. Resizing to the current
    /// size skips the reallocation but still clears.
    pub fn resize(&mut self, width: u32, height: u32, clear: Color) -> Result<()> {
        if width == self.width && height == self.height {
            self.clear(clear);
            return Ok(());
        }

        let count = pixel_count(width, height)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(count)?;
        pixels.resize(count, clear.0);

        debug!(
            "canvas resized {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.pixels = pixels;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Packed pixels, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Raw bytes for texture upload (native-endian ARGB8888 words)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Bytes per row, for texture upload pitch
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_zeroed() {
        let buffer = PixelBuffer::with_size(4, 3);
        assert_eq!(buffer.pixels().len(), 12);
        assert!(buffer.pixels().iter().all(|&p| p == 0));
        assert_eq!(buffer.pitch(), 16);
    }

    #[test]
    fn test_pset_opaque_overwrites_exactly() {
        let mut buffer = PixelBuffer::with_size(8, 8);
        buffer.clear(Color(0xFF10_2030));
        buffer.pset(3, 4, Color(0xFFAB_CDEF));
        assert_eq!(buffer.pixel(3, 4), Some(Color(0xFFAB_CDEF)));
        assert_eq!(buffer.pixel(4, 4), Some(Color(0xFF10_2030)));
    }

    #[test]
    fn test_pset_zero_alpha_is_noop() {
        let mut buffer = PixelBuffer::with_size(8, 8);
        buffer.clear(Color(0xFF12_3456));
        let before = buffer.clone();
        buffer.pset(1, 1, Color(0x00FF_FFFF));
        buffer.pset(2, 2, Color::TRANSPARENT);
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_pset_out_of_bounds_is_noop() {
        let mut buffer = PixelBuffer::with_size(8, 8);
        buffer.clear(Color::BLACK);
        let before = buffer.clone();
        for &(x, y) in &[
            (-1, 0),
            (0, -1),
            (8, 0),
            (0, 8),
            (8, 8),
            (i64::MIN, i64::MIN),
            (i64::MAX, 3),
            (3, i64::MAX),
        ] {
            buffer.pset(x, y, Color::WHITE);
            buffer.pset(x, y, Color(0x80FF_FFFF));
        }
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_half_alpha_blend_over_black() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.clear(Color::BLACK);
        buffer.pset(0, 0, Color(0x80FF_FFFF));
        let c = buffer.pixel(0, 0).unwrap();
        // RGB within one step of 0x7F, alpha is the source alpha
        for channel in [c.red(), c.green(), c.blue()] {
            assert!((0x7E..=0x80).contains(&channel), "channel {channel:#x}");
        }
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c, Color(0x8080_8080));
    }

    #[test]
    fn test_blend_truncates() {
        // (100*200 + 155*10) / 255 = 21550 / 255 = 84.5 -> 84
        assert_eq!(blend_channel(200, 10, 100), 84);
        // (1*255 + 254*0) / 255 = 1
        assert_eq!(blend_channel(255, 0, 1), 1);
        // (254*1 + 1*0) / 255 = 0.99 -> 0
        assert_eq!(blend_channel(1, 0, 254), 0);
    }

    #[test]
    fn test_sequential_blends_compose_with_formula() {
        let mut buffer = PixelBuffer::with_size(1, 1);
        buffer.clear(Color(0xFF20_4060));
        let a = Color(0x40C0_8000);
        let b = Color(0xA010_F0FF);
        buffer.pset(0, 0, a);
        buffer.pset(0, 0, b);

        let after_a = composite(a, 0xFF20_4060);
        let expected = composite(b, after_a);
        assert_eq!(buffer.pixel(0, 0), Some(Color(expected)));
        assert_eq!(buffer.pixel(0, 0).unwrap().alpha(), 0xA0);
    }

    #[test]
    fn test_resize_clears_and_reports_new_size() {
        let mut buffer = PixelBuffer::with_size(4, 4);
        buffer.pset(1, 1, Color::RED);
        buffer.resize(7, 5, Color(0xFF33_6699)).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (7, 5));
        assert_eq!(buffer.pixels().len(), 35);
        assert!(buffer.pixels().iter().all(|&p| p == 0xFF33_6699));
    }

    #[test]
    fn test_resize_same_size_still_clears() {
        let mut buffer = PixelBuffer::with_size(3, 3);
        buffer.pset(0, 0, Color::RED);
        buffer.resize(3, 3, Color::BLUE).unwrap();
        assert!(buffer.pixels().iter().all(|&p| p == Color::BLUE.0));
    }

    #[test]
    fn test_resize_transparent_clear_color_is_written() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.clear(Color::WHITE);
        buffer.resize(3, 1, Color::TRANSPARENT).unwrap();
        assert!(buffer.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_resize_to_zero_area() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.resize(0, 10, Color::WHITE).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (0, 10));
        assert!(buffer.pixels().is_empty());
        buffer.pset(0, 0, Color::WHITE);
        assert_eq!(buffer.pixel(0, 0), None);
    }

    #[test]
    fn test_failed_resize_leaves_buffer_intact() {
        let mut buffer = PixelBuffer::with_size(2, 2);
        buffer.clear(Color::GREEN);
        let before = buffer.clone();
        assert!(buffer.resize(u32::MAX, u32::MAX, Color::WHITE).is_err());
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_as_bytes_matches_native_words() {
        let mut buffer = PixelBuffer::with_size(2, 1);
        buffer.pset(1, 0, Color(0xFF01_0203));
        let bytes = buffer.as_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[4..8], &0xFF01_0203u32.to_ne_bytes());
    }
}
