// Plane heading, smoothed along the shortest arc.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    pub current_deg: f64,
}

/// Signed shortest difference `target - current`, in `[-180, 180)`.
pub fn shortest_arc(current: f64, target: f64) -> f64 {
    (target - current + 540.0).rem_euclid(360.0) - 180.0
}

/// Facing angle for an offset, or `None` if the offset carries no direction.
pub fn target_heading(dx: f64, dy: f64, offset_deg: f64) -> Option<f64> {
    if dx.hypot(dy) <= super::velocity::EPSILON {
        return None;
    }
    Some(dy.atan2(dx).to_degrees() + offset_deg)
}

impl Heading {
    /// Moves toward `target` (or holds if there is none) and returns the new angle.
    pub fn step_toward(&mut self, target: Option<f64>, factor: f64) -> f64 {
        if let Some(target) = target {
            self.current_deg += shortest_arc(self.current_deg, target) * factor;
        }
        self.current_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_across_the_seam() {
        assert!((shortest_arc(170.0, -170.0) - 20.0).abs() < 1e-9);
        assert!((shortest_arc(-170.0, 170.0) + 20.0).abs() < 1e-9);
        assert!((shortest_arc(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((shortest_arc(0.0, 720.0 + 45.0) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn step_is_bounded_by_half_turn() {
        let factor = 0.2;
        for cur in [-700.0, -90.0, 0.0, 33.0, 179.0, 540.0] {
            for tgt in [-360.0, -181.0, 0.0, 90.0, 181.0, 1000.0] {
                let mut h = Heading { current_deg: cur };
                let after = h.step_toward(Some(tgt), factor);
                assert!((after - cur).abs() <= factor * 180.0 + 1e-9);
            }
        }
    }

    #[test]
    fn holds_without_direction() {
        assert_eq!(target_heading(0.0, 0.0, 90.0), None);
        let mut h = Heading { current_deg: 42.0 };
        assert_eq!(h.step_toward(None, 0.5), 42.0);
    }

    #[test]
    fn icon_offset_is_applied() {
        // touch straight to the right, icon drawn pointing up
        let t = target_heading(50.0, 0.0, 90.0).unwrap();
        assert!((t - 90.0).abs() < 1e-9);
        let t = target_heading(0.0, 50.0, 0.0).unwrap();
        assert!((t - 90.0).abs() < 1e-9);
    }
}
