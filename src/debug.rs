//! Frame timing and the on-canvas debug overlay

use std::time::Instant;

use crate::display::{draw_text, Color, PixelBuffer, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Fixed update step used when catching up, in seconds
pub const FIXED_STEP: f32 = 1.0 / 60.0;

/// Upper bound on fixed updates run for one rendered frame
pub const MAX_CATCHUP_STEPS: u32 = 10;

const OVERLAY_BACKGROUND: Color = Color(0x7F00_0000);

/// How game updates are paced against rendered frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// One update per rendered frame, with the measured delta
    Lockstep,
    /// Fixed-size updates, as many as the elapsed time calls for
    #[default]
    Catchup,
}

impl Pacing {
    pub fn label(self) -> &'static str {
        match self {
            Pacing::Lockstep => "Lockstep",
            Pacing::Catchup => "Catchup",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Pacing::Lockstep => Pacing::Catchup,
            Pacing::Catchup => Pacing::Lockstep,
        }
    }
}

/// Wall-clock frame timer with a fixed-step accumulator
pub struct FrameTimer {
    last_frame: Instant,
    lag: f32,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            lag: 0.0,
        }
    }

    /// Call once per frame; returns seconds since the previous call
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    /// Add `dt` to the accumulated lag and return how many fixed steps to run
    ///
    /// Lag beyond [`MAX_CATCHUP_STEPS`] steps is dropped so a long stall
    /// does not turn into a burst of updates.
    pub fn catch_up(&mut self, dt: f32) -> u32 {
        self.lag += dt.max(0.0);
        let mut steps = 0;
        while self.lag >= FIXED_STEP && steps < MAX_CATCHUP_STEPS {
            self.lag -= FIXED_STEP;
            steps += 1;
        }
        if steps == MAX_CATCHUP_STEPS {
            self.lag = self.lag.min(FIXED_STEP);
        }
        steps
    }

    pub fn lag(&self) -> f32 {
        self.lag
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame-rate readout drawn in the bottom-right corner of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOverlay {
    avg_fps: f64,
    /// Weight kept by the previous average on each sample
    alpha: f64,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self {
            avg_fps: 58.0,
            alpha: 0.9,
        }
    }

    pub fn avg_fps(&self) -> f64 {
        self.avg_fps
    }

    /// Fold one frame's duration into the exponential moving average
    ///
    /// The `+ 1` keeps a zero-length frame finite.
    pub fn record_frame(&mut self, elapsed_ms: f64) {
        let frames_this_second = 1000.0 / (elapsed_ms.max(0.0) + 1.0);
        self.avg_fps = self.alpha * self.avg_fps + (1.0 - self.alpha) * frames_this_second;
    }

    pub fn fps_label(&self) -> String {
        format!("{:.1} fps", self.avg_fps)
    }

    /// Draw the readout onto `buffer` through the normal blended path
    pub fn draw(&self, buffer: &mut PixelBuffer, vsync: bool, pacing: Pacing) {
        let glyph_w = GLYPH_WIDTH as i64;
        let glyph_h = GLYPH_HEIGHT as i64;
        let width = buffer.width() as i64;
        let height = buffer.height() as i64;

        let start_x = width - 4 * glyph_w - 2;
        let start_y = height - glyph_h - 2;
        buffer.rect_fill(start_x, start_y, 4 * glyph_w + 2, glyph_h + 2, OVERLAY_BACKGROUND);
        draw_text(buffer, &self.fps_label(), start_x + 1, start_y + 1, Color::WHITE);

        let label_x = width - 9 * glyph_w - 2;
        let vsync_label = if vsync { "VSync On" } else { "VSync Off" };
        draw_text(buffer, vsync_label, label_x, start_y - glyph_h, Color::WHITE);
        draw_text(buffer, pacing.label(), label_x, start_y - 2 * glyph_h, Color::WHITE);
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new()
    }
}
