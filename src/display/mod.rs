mod color;
mod font;
mod line;
mod pixel_buffer;
mod rect;
mod screenshot;
mod shapes;
mod viewport;
#[cfg(feature = "window")]
mod window;

pub use color::Color;
pub use font::{draw_glyph, draw_text, get_glyph, text_width, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use pixel_buffer::PixelBuffer;
pub use viewport::Viewport;
#[cfg(feature = "window")]
pub use window::{Display, InputEvent, RenderTarget};

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;

/// Coordinates of every non-transparent pixel, row-major
#[cfg(test)]
pub(crate) fn lit_pixels(buffer: &PixelBuffer) -> Vec<(i64, i64)> {
    let mut points = Vec::new();
    for y in 0..buffer.height() as i64 {
        for x in 0..buffer.width() as i64 {
            if buffer.pixel(x, y) != Some(Color::TRANSPARENT) {
                points.push((x, y));
            }
        }
    }
    points
}
