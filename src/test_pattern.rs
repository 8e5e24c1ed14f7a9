//! Calibration scene that exercises every drawing primitive

use crate::config::CanvasConfig;
use crate::debug::{DebugOverlay, Pacing};
use crate::display::{draw_text, text_width, Color, PixelBuffer, GLYPH_HEIGHT};
use crate::error::Result;

// SMPTE color bar colors (75% intensity)
const BARS: [Color; 7] = [
    Color::rgb(191, 191, 191),
    Color::rgb(191, 191, 0),
    Color::rgb(0, 191, 191),
    Color::rgb(0, 191, 0),
    Color::rgb(191, 0, 191),
    Color::rgb(191, 0, 0),
    Color::rgb(0, 0, 191),
];

// Pluge strip for black level calibration
const NEG_I: Color = Color::rgb(0, 68, 130);
const POS_Q: Color = Color::rgb(67, 0, 130);
const BLACK_PLUS: Color = Color::rgb(10, 10, 10);

const SHADE: Color = Color(0x8000_0000);
const GUIDE: Color = Color(0xC0FF_FFFF);

/// SMPTE-style bars with a geometry overlay and a bouncing ball
pub struct TestPattern {
    time: f32,
}

impl TestPattern {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Paint the scene over the current canvas contents
    ///
    /// The strip to the right of the pluge bars is left unpainted, so the
    /// caller's clear color shows there.
    pub fn render(&self, buffer: &mut PixelBuffer) {
        let width = buffer.width() as i64;
        let height = buffer.height() as i64;

        // Bars take the top 2/3; the last bar absorbs the rounding remainder
        let main_height = height * 2 / 3;
        let bar_width = width / BARS.len() as i64;
        for (i, &color) in BARS.iter().enumerate() {
            let x = i as i64 * bar_width;
            let w = if i + 1 == BARS.len() { width - x } else { bar_width };
            buffer.rect_fill(x, 0, w, main_height, color);
        }

        let strip_width = width / 6;
        let strip_height = height - main_height;
        for (i, &color) in [NEG_I, Color::WHITE, POS_Q, Color::BLACK, BLACK_PLUS]
            .iter()
            .enumerate()
        {
            buffer.rect_fill(i as i64 * strip_width, main_height, strip_width, strip_height, color);
        }

        // Geometry overlay
        let cx = width / 2;
        let cy = height / 2;
        let radius = width.min(height) / 3;
        buffer.line(cx - radius, cy, cx + radius, cy, GUIDE);
        buffer.line(cx, cy - radius, cx, cy + radius, GUIDE);
        buffer.line(cx - radius, cy - radius, cx + radius, cy + radius, GUIDE);
        buffer.circle(cx, cy, radius, Color::WHITE);
        buffer.ellipse(
            cx - radius - radius / 2,
            cy - radius / 2,
            cx + radius + radius / 2,
            cy + radius / 2,
            Color::WHITE,
        );
        buffer.rect(cx - radius, cy - radius, 2 * radius + 1, 2 * radius + 1, GUIDE);

        // Ball bouncing along the bottom strip
        let ball_r = (strip_height / 4).max(1);
        let travel = (width - 2 * ball_r).max(0) as f32;
        let phase = (self.time * 0.8).sin() * 0.5 + 0.5;
        let ball_x = ball_r + (phase * travel) as i64;
        let ball_y = main_height + strip_height / 2;
        buffer.circle_filled(ball_x, ball_y, ball_r, Color::YELLOW);
        buffer.ellipse_filled(
            ball_x - ball_r,
            ball_y + ball_r - 1,
            ball_x + ball_r,
            ball_y + ball_r + 1,
            SHADE,
        );

        let title = "RETROCANVAS";
        let size = format!("{}x{}", width, height);
        let glyph_h = GLYPH_HEIGHT as i64;
        let box_w = text_width(title).max(text_width(&size)) + 4;
        let box_x = cx - box_w / 2;
        let box_y = cy + radius / 2 + 2;
        buffer.rect_fill(box_x, box_y, box_w, 2 * glyph_h + 6, SHADE);
        draw_text(buffer, title, cx - text_width(title) / 2, box_y + 2, Color::WHITE);
        draw_text(buffer, &size, cx - text_width(&size) / 2, box_y + glyph_h + 4, Color::CYAN);
    }
}

/// One frame of the pattern on a fresh `config`-sized canvas
///
/// The canvas is cleared to `config.clear_color` first; the debug overlay is
/// drawn on top when `config.debug_overlay` is set.
pub fn render_still(config: &CanvasConfig) -> Result<PixelBuffer> {
    let mut buffer = PixelBuffer::try_with_size(config.width, config.height)?;
    buffer.clear(config.clear_color);
    TestPattern::new().render(&mut buffer);
    if config.debug_overlay {
        DebugOverlay::new().draw(&mut buffer, config.vsync, Pacing::default());
    }
    Ok(buffer)
}

impl Default for TestPattern {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_deterministic() {
        let pattern = TestPattern::new();
        let mut a = PixelBuffer::with_size(320, 240);
        let mut b = PixelBuffer::with_size(320, 240);
        pattern.render(&mut a);
        pattern.render(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_covers_canvas() {
        let mut buffer = PixelBuffer::with_size(320, 240);
        buffer.clear(Color::BLACK);
        TestPattern::new().render(&mut buffer);
        assert!(buffer.pixels().iter().all(|&p| p != 0));
    }

    #[test]
    fn test_clear_color_shows_where_unpainted() {
        let background = Color(0xFF11_2233);
        let mut buffer = PixelBuffer::with_size(320, 240);
        buffer.clear(background);
        TestPattern::new().render(&mut buffer);

        // Five 53px pluge bars end at x = 265
        assert_eq!(buffer.pixel(300, 170), Some(background));
        assert_eq!(buffer.pixel(319, 239), Some(background));
        assert_eq!(buffer.pixel(265, 239), Some(background));
        assert_eq!(buffer.pixel(264, 239), Some(BLACK_PLUS));
    }

    #[test]
    fn test_render_still_uses_config() {
        let config = CanvasConfig {
            width: 160,
            height: 120,
            clear_color: Color(0xFF20_4060),
            ..CanvasConfig::default()
        };
        let buffer = render_still(&config).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (160, 120));
        assert_eq!(buffer.pixel(159, 119), Some(Color(0xFF20_4060)));

        let with_overlay = render_still(&CanvasConfig {
            debug_overlay: true,
            ..config
        })
        .unwrap();
        // Overlay box starts at (160 - 34, 120 - 10)
        assert_eq!(with_overlay.pixel(126, 110).map(Color::alpha), Some(0x7F));
    }

    #[test]
    fn test_bars() {
        let mut buffer = PixelBuffer::with_size(320, 240);
        TestPattern::new().render(&mut buffer);
        // 320 / 7 = 45 px bars, 160 px tall
        assert_eq!(buffer.pixel(5, 5), Some(BARS[0]));
        assert_eq!(buffer.pixel(50, 5), Some(BARS[1]));
        assert_eq!(buffer.pixel(315, 5), Some(BARS[6]));
        assert_eq!(buffer.pixel(5, 165), Some(NEG_I));
    }

    #[test]
    fn test_update_moves_ball() {
        let mut pattern = TestPattern::new();
        let mut before = PixelBuffer::with_size(320, 240);
        pattern.render(&mut before);

        pattern.update(1.0);
        assert_eq!(pattern.time(), 1.0);
        let mut after = PixelBuffer::with_size(320, 240);
        pattern.render(&mut after);
        assert_ne!(before, after);
    }

    #[test]
    fn test_render_tiny_canvas() {
        for (w, h) in [(0, 0), (1, 1), (3, 200), (200, 3)] {
            let mut buffer = PixelBuffer::with_size(w, h);
            TestPattern::new().render(&mut buffer);
            assert_eq!(buffer.pixels().len(), (w * h) as usize);
        }
    }
}
