//! Error type shared by the canvas, its config and the presentation layer

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    /// `width * height` does not fit in memory addressing
    #[error("canvas dimensions {width}x{height} are too large")]
    Dimensions { width: u32, height: u32 },

    /// Backing store for a new canvas size could not be reserved
    #[error("failed to allocate canvas storage: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// SDL reports its failures as plain strings
    #[error("display error: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
