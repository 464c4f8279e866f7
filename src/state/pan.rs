// Sub-pixel pan accumulator: only whole units leave, the remainder stays.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PanAccumulator {
    pub accum_x: f64,
    pub accum_y: f64,
}

impl PanAccumulator {
    /// Adds this frame's delta and returns the whole-unit part to pan by, if any.
    /// Afterwards both axes satisfy `|accum| < 1`.
    pub fn push(&mut self, dx: f64, dy: f64) -> Option<(f64, f64)> {
        self.accum_x += dx;
        self.accum_y += dy;
        // trunc() is floor for positive and ceil for negative values
        let wx = self.accum_x.trunc();
        let wy = self.accum_y.trunc();
        if wx == 0.0 && wy == 0.0 {
            return None;
        }
        self.accum_x -= wx;
        self.accum_y -= wy;
        Some((wx, wy))
    }
}
