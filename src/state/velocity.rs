//! Touch offset -> pan velocity.
//!
//! The target velocity points away from the touch (the map is dragged under
//! the plane, so the plane appears to fly toward the finger) with a fixed
//! magnitude. The actual velocity follows it through a first-order low-pass
//! filter, stepped once per frame.

/// Offsets at or below this magnitude count as "no direction".
pub const EPSILON: f64 = 1e-4;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub vel_x: f64,
    pub vel_y: f64,
}

pub fn target_velocity(is_touching: bool, dx: f64, dy: f64, speed: f64) -> (f64, f64) {
    let mag = dx.hypot(dy);
    if !is_touching || mag <= EPSILON {
        return (0.0, 0.0);
    }
    (-dx / mag * speed, -dy / mag * speed)
}

/// One exponential smoothing step of `current` toward `target`.
pub fn smooth(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

impl Velocity {
    pub fn step_toward(&mut self, target: (f64, f64), factor: f64) {
        self.vel_x = smooth(self.vel_x, target.0, factor);
        self.vel_y = smooth(self.vel_y, target.1, factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn target_is_opposite_unit_offset_times_speed() {
        for (dx, dy) in [(3.0, 4.0), (-120.0, 5.0), (0.0, -250.0), (0.001, 0.0)] {
            let (tx, ty) = target_velocity(true, dx, dy, 5.0);
            assert!(approx(tx.hypot(ty), 5.0));
            let mag = f64::hypot(dx, dy);
            assert!(approx(tx / 5.0, -dx / mag));
            assert!(approx(ty / 5.0, -dy / mag));
        }
    }

    #[test]
    fn tiny_offset_or_released_gives_zero_target() {
        assert_eq!(target_velocity(true, 0.0, 0.0, 5.0), (0.0, 0.0));
        assert_eq!(target_velocity(true, 1e-4, 0.0, 5.0), (0.0, 0.0));
        assert_eq!(target_velocity(true, 5e-5, -5e-5, 5.0), (0.0, 0.0));
        assert_eq!(target_velocity(false, 100.0, 100.0, 5.0), (0.0, 0.0));
    }

    #[test]
    fn smoothing_is_stable_at_fixed_point() {
        let mut v = Velocity { vel_x: -2.5, vel_y: 1.25 };
        v.step_toward((-2.5, 1.25), 0.3);
        assert_eq!(v, Velocity { vel_x: -2.5, vel_y: 1.25 });
    }

    #[test]
    fn smoothing_converges_without_jumping() {
        let mut v = Velocity::default();
        v.step_toward((4.0, 0.0), 0.25);
        assert!(approx(v.vel_x, 1.0));
        let mut prev = v.vel_x;
        for _ in 0..50 {
            v.step_toward((4.0, 0.0), 0.25);
            assert!(v.vel_x > prev && v.vel_x < 4.0);
            prev = v.vel_x;
        }
        assert!((4.0 - v.vel_x) < 1e-4);
    }
}
