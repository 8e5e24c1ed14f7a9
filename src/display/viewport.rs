/// Letterboxed region of the window the canvas is shown in, in canvas units
///
/// The presentation layer scales the canvas uniformly to fit the window and
/// centers it; pointer positions arrive in window pixels and are mapped back
/// through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Canvas units per window pixel: the axis needing the most shrink wins
fn canvas_per_window_pixel(window: (u32, u32), canvas: (u32, u32)) -> f32 {
    let sx = canvas.0 as f32 / window.0.max(1) as f32;
    let sy = canvas.1 as f32 / window.1.max(1) as f32;
    sx.max(sy)
}

impl Viewport {
    /// Viewport of a `canvas`-sized logical surface centered in `window`
    pub fn letterbox(window: (u32, u32), canvas: (u32, u32)) -> Self {
        let scale = canvas_per_window_pixel(window, canvas);
        let logical_w = (window.0 as f32 * scale) as i32;
        let logical_h = (window.1 as f32 * scale) as i32;
        Self {
            x: (logical_w - canvas.0 as i32) / 2,
            y: (logical_h - canvas.1 as i32) / 2,
            w: canvas.0 as i32,
            h: canvas.1 as i32,
        }
    }

    /// Map a window-space pointer position to canvas coordinates
    ///
    /// Positions over the letterbox bars map outside `[0, w) x [0, h)`.
    pub fn window_to_canvas(
        &self,
        pointer: (i32, i32),
        window: (u32, u32),
        canvas: (u32, u32),
    ) -> (f32, f32) {
        let scale = canvas_per_window_pixel(window, canvas);
        (
            pointer.0 as f32 * scale - self.x as f32,
            pointer.1 as f32 * scale - self.y as f32,
        )
    }

    /// Check whether a canvas-space point lies inside the viewport
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.w as f32 && y < self.h as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_integer_scale() {
        let viewport = Viewport::letterbox((640, 480), (320, 240));
        assert_eq!(viewport, Viewport { x: 0, y: 0, w: 320, h: 240 });
        let (x, y) = viewport.window_to_canvas((100, 50), (640, 480), (320, 240));
        assert_eq!((x, y), (50.0, 25.0));
    }

    #[test]
    fn test_pillarbox_offsets_x() {
        // 800x480 window: height limits the scale to 2x, 40 canvas px of bars each side
        let viewport = Viewport::letterbox((800, 480), (320, 240));
        assert_eq!(viewport, Viewport { x: 40, y: 0, w: 320, h: 240 });
        let (x, y) = viewport.window_to_canvas((440, 240), (800, 480), (320, 240));
        assert_eq!((x, y), (180.0, 120.0));
        let (x, _) = viewport.window_to_canvas((20, 240), (800, 480), (320, 240));
        assert!(!viewport.contains(x, 0.0));
    }

    #[test]
    fn test_letterbox_offsets_y() {
        let viewport = Viewport::letterbox((640, 640), (320, 240));
        assert_eq!(viewport, Viewport { x: 0, y: 40, w: 320, h: 240 });
    }

    #[test]
    fn test_zero_window_does_not_divide_by_zero() {
        let viewport = Viewport::letterbox((0, 0), (320, 240));
        assert_eq!(viewport.w, 320);
    }
}
