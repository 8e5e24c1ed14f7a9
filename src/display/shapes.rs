//! Circle and ellipse rasterizers
//!
//! Both walk one octant/quadrant and mirror it. Neither clips: points and
//! spans outside the canvas are dropped by `pset`.

use std::f64::consts::PI;

use super::{Color, PixelBuffer};

/// Walk the first octant of a circle of radius `r`, calling `plot(x, y)`
/// with offsets from the center, `x` rising from 0 while `x <= y`.
///
/// The decision term uses PI-scaled increments, truncated to an integer
/// after every step. `y` steps down whenever the term is non-negative.
fn circle_octant(r: i64, mut plot: impl FnMut(i64, i64)) {
    let mut x = 0;
    let mut y = r;
    let mut d = (PI - 2.0 * r as f64).round() as i64;

    while x <= y {
        plot(x, y);
        if d < 0 {
            d = (d as f64 + PI * x as f64 + PI * 2.0) as i64;
        } else {
            d = (d as f64 + PI * (x - y) as f64 + PI * 3.0) as i64;
            y -= 1;
        }
        x += 1;
    }
}

/// Center and radii of the ellipse inscribed in a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EllipseBox {
    xc: i64,
    yc: i64,
    rx: i64,
    ry: i64,
}

impl EllipseBox {
    /// Corners may be given in any order
    fn from_corners(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        // Half of any i64 span fits in i64
        let rx = (x2.abs_diff(x1) / 2) as i64;
        let ry = (y2.abs_diff(y1) / 2) as i64;
        Self {
            xc: x1.min(x2) + rx,
            yc: y1.min(y2) + ry,
            rx,
            ry,
        }
    }
}

/// Walk one quadrant of an ellipse after its pole `(0, ry)`, calling
/// `plot(x, y)` with offsets from the center.
///
/// Region 1 steps x while the tangent slope magnitude is below 1, region 2
/// steps y down to the major axis. The decision value is the implicit
/// ellipse equation evaluated at the candidate midpoint.
fn ellipse_quadrant(rx: i64, ry: i64, mut plot: impl FnMut(i64, i64)) {
    let rx2 = rx as f64 * rx as f64;
    let ry2 = ry as f64 * ry as f64;
    let rx2ry2 = rx2 * ry2;
    // 0/0 at a degenerate radius is NaN, which ends region 1 immediately
    let slope = |x: i64, y: i64| (ry2 * x as f64) / (rx2 * y as f64);

    let mut x = 0;
    let mut y = ry;

    while slope(x, y).abs() < 1.0 {
        x += 1;
        let d = ry2 * (x as f64 * x as f64) + rx2 * (y as f64 - 0.5).powi(2) - rx2ry2;
        if d > 0.0 {
            y -= 1;
        }
        plot(x, y);
    }

    while y > 0 {
        y -= 1;
        let d = rx2 * (y as f64 * y as f64) + ry2 * (x as f64 + 0.5).powi(2) - rx2ry2;
        if d <= 0.0 {
            x += 1;
        }
        plot(x, y);
    }
}

impl PixelBuffer {
    /// Draw a circle outline (1px thick), eight mirrored points per step
    ///
    /// Radius 0 is a single pixel; a negative radius draws nothing.
    pub fn circle(&mut self, x0: i64, y0: i64, r: i64, color: Color) {
        circle_octant(r, |x, y| {
            let (left_x, right_x) = (x0.saturating_sub(x), x0.saturating_add(x));
            let (left_y, right_y) = (x0.saturating_sub(y), x0.saturating_add(y));
            let (top_x, bottom_x) = (y0.saturating_sub(x), y0.saturating_add(x));
            let (top_y, bottom_y) = (y0.saturating_sub(y), y0.saturating_add(y));

            self.pset(right_x, bottom_y, color);
            self.pset(right_y, bottom_x, color);
            self.pset(left_y, bottom_x, color);
            self.pset(left_x, bottom_y, color);

            self.pset(left_x, top_y, color);
            self.pset(left_y, top_x, color);
            self.pset(right_y, top_x, color);
            self.pset(right_x, top_y, color);
        });
    }

    /// Draw a filled circle as four horizontal spans per octant step
    ///
    /// Spans overlap at the pole rows; with a translucent color those
    /// pixels blend more than once.
    pub fn circle_filled(&mut self, x0: i64, y0: i64, r: i64, color: Color) {
        circle_octant(r, |x, y| {
            let (left_x, right_x) = (x0.saturating_sub(x), x0.saturating_add(x));
            let (left_y, right_y) = (x0.saturating_sub(y), x0.saturating_add(y));
            let (top_x, bottom_x) = (y0.saturating_sub(x), y0.saturating_add(x));
            let (top_y, bottom_y) = (y0.saturating_sub(y), y0.saturating_add(y));

            self.line(left_x, bottom_y, right_x, bottom_y, color);
            self.line(left_y, bottom_x, right_y, bottom_x, color);
            self.line(right_x, top_y, left_x, top_y, color);
            self.line(left_y, top_x, right_y, top_x, color);
        });
    }

    /// Draw an ellipse outline inscribed in the box with opposite corners
    /// `(x1, y1)` and `(x2, y2)`
    pub fn ellipse(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color) {
        let EllipseBox { xc, yc, rx, ry } = EllipseBox::from_corners(x1, y1, x2, y2);

        self.pset(xc, yc + ry, color);
        self.pset(xc, yc - ry, color);

        ellipse_quadrant(rx, ry, |x, y| {
            self.pset(xc + x, yc + y, color);
            self.pset(xc - x, yc - y, color);
            self.pset(xc - x, yc + y, color);
            self.pset(xc + x, yc - y, color);
        });
    }

    /// Draw a filled ellipse inscribed in the box with opposite corners
    /// `(x1, y1)` and `(x2, y2)`, one span per mirrored row per step
    pub fn ellipse_filled(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color) {
        let EllipseBox { xc, yc, rx, ry } = EllipseBox::from_corners(x1, y1, x2, y2);

        self.pset(xc, yc + ry, color);
        self.pset(xc, yc - ry, color);

        ellipse_quadrant(rx, ry, |x, y| {
            self.line(xc + x, yc + y, xc - x, yc + y, color);
            self.line(xc - x, yc - y, xc + x, yc - y, color);
        });
    }
}
