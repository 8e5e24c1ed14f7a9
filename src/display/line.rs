use super::{Color, PixelBuffer};

impl PixelBuffer {
    /// Draw a line with a Bresenham-style error stepper
    ///
    /// Stepping the minor axis subtracts only `2 * major` from the error
    /// term, so sloped lines drift short of the far endpoint on the minor
    /// axis; existing output depends on it. The start point is always drawn.
    /// No clipping happens here: every point goes through
    /// [`PixelBuffer::pset`], which drops the off-canvas ones.
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color) {
        if y2.abs_diff(y1) < x2.abs_diff(x1) {
            if x1 > x2 {
                self.line_low(x2, y2, x1, y1, color);
            } else {
                self.line_low(x1, y1, x2, y2, color);
            }
        } else if y1 > y2 {
            self.line_high(x2, y2, x1, y1, color);
        } else {
            self.line_high(x1, y1, x2, y2, color);
        }
    }

    /// Shallow stepper: x drives, requires x1 <= x2
    fn line_low(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color) {
        let dx = i128::from(x2) - i128::from(x1);
        let dy = i128::from(y2.abs_diff(y1));
        let yi = if y2 < y1 { -1 } else { 1 };
        let mut err = 2 * dy - dx;
        let mut y = y1;

        for x in x1..=x2 {
            self.pset(x, y, color);
            if err > 0 {
                y += yi;
                err -= 2 * dx;
            } else {
                err += 2 * dy;
            }
        }
    }

    /// Steep stepper: y drives, requires y1 <= y2
    fn line_high(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color) {
        let dy = i128::from(y2) - i128::from(y1);
        let dx = i128::from(x2.abs_diff(x1));
        let xi = if x2 < x1 { -1 } else { 1 };
        let mut err = 2 * dx - dy;
        let mut x = x1;

        for y in y1..=y2 {
            self.pset(x, y, color);
            if err > 0 {
                x += xi;
                err -= 2 * dy;
            } else {
                err += 2 * dx;
            }
        }
    }
}
