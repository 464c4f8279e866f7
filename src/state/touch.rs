// Single-finger touch state: last position and its offset from the viewport center.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct TouchState {
    pub is_touching: bool,
    pub x: f64,
    pub y: f64,
    pub delta_x: f64,
    pub delta_y: f64,
}

impl TouchState {
    /// Records a touch-start/move at screen position `(x, y)` in a viewport of
    /// `width` x `height` pixels.
    pub fn record(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.is_touching = true;
        self.x = x;
        self.y = y;
        self.delta_x = x - width / 2.0;
        self.delta_y = y - height / 2.0;
    }

    /// The offset is kept; it still drives the heading after release.
    pub fn release(&mut self) {
        self.is_touching = false;
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.delta_x, self.delta_y)
    }

    pub fn magnitude(&self) -> f64 {
        self.delta_x.hypot(self.delta_y)
    }
}
