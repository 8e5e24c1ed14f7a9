//! Software-rasterized 2D canvas for a small fantasy-console style runtime.
//!
//! A [`PixelBuffer`] holds packed `0xAARRGGBB` pixels. Every primitive
//! (lines, circles, ellipses, rectangles, 8x8 bitmap text) funnels through
//! [`PixelBuffer::pset`], which clips and alpha-composites. The buffer can be
//! encoded to PNG, or shown in an SDL2 window with the `window` feature.

pub mod config;
pub mod debug;
pub mod display;
pub mod error;
pub mod test_pattern;

pub use config::CanvasConfig;
pub use debug::{DebugOverlay, FrameTimer, Pacing};
pub use display::{draw_text, Color, PixelBuffer, Viewport};
pub use error::{CanvasError, Result};
pub use test_pattern::TestPattern;
