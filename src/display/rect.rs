use super::{Color, PixelBuffer};

impl PixelBuffer {
    /// Draw the 1px border of the box `[x, x+w) x [y, y+h)`
    ///
    /// Four inclusive lines; the corners are written twice. Empty boxes
    /// (`w <= 0` or `h <= 0`) draw nothing.
    pub fn rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        self.line(x, y, x, bottom, color);
        self.line(x, y, right, y, color);
        self.line(x, bottom, right, bottom, color);
        self.line(right, y, right, bottom, color);
    }

    /// Fill the box `[x, x+w) x [y, y+h)`
    ///
    /// Clamps both corners to the canvas first, then writes every remaining
    /// pixel through `pset`, so translucent fills blend.
    pub fn rect_fill(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        let width = self.width() as i64;
        let height = self.height() as i64;
        let x1 = x.clamp(0, width);
        let y1 = y.clamp(0, height);
        let x2 = x.saturating_add(w).clamp(0, width);
        let y2 = y.saturating_add(h).clamp(0, height);

        for j in y1..y2 {
            for i in x1..x2 {
                self.pset(i, j, color);
            }
        }
    }
}
