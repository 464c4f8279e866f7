//! Distance-to-target check and the one-shot win latch.

use crate::config::LatLng;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // rounding can push h past 1 near the antipode
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// `NotShown -> Shown`, never back. Once set, the modal has been requested
/// and the target counts as reached.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLatch {
    pub won: bool,
}

impl WinLatch {
    /// Returns true exactly once: on the first call with `distance_km <= threshold_km`.
    pub fn check(&mut self, distance_km: f64, threshold_km: f64) -> bool {
        // negated so a NaN distance never wins
        if self.won || !(distance_km <= threshold_km) {
            return false;
        }
        self.won = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELSINKI: LatLng = LatLng::new(60.1699, 24.9384);

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(HELSINKI, HELSINKI), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let zurich = LatLng::new(47.447915, 8.562177);
        let a = haversine_km(HELSINKI, zurich);
        let b = haversine_km(zurich, HELSINKI);
        assert!((a - b).abs() < 1e-9);
        assert!(a > 1700.0 && a < 1850.0);
    }

    #[test]
    fn near_and_far_from_target() {
        let near = haversine_km(LatLng::new(60.30, 24.90), HELSINKI);
        assert!(near > 14.0 && near < 15.5, "near = {near}");
        let far = haversine_km(LatLng::new(59.90, 24.90), HELSINKI);
        assert!(far > 29.0 && far < 31.0, "far = {far}");

        let mut latch = WinLatch::default();
        assert!(!latch.check(far, 16.0));
        assert!(latch.check(near, 16.0));
    }

    #[test]
    fn latch_fires_once() {
        let mut latch = WinLatch::default();
        assert!(latch.check(0.0, 20.0));
        assert!(latch.won);
        assert!(!latch.check(0.0, 20.0));
        assert!(!latch.check(100.0, 20.0));
    }

    #[test]
    fn antipodal_pairs_stay_finite() {
        let mut lat = -89.99;
        while lat < 90.0 {
            let d = haversine_km(LatLng::new(lat, 10.0), LatLng::new(-lat, -170.0));
            assert!(d.is_finite(), "lat = {lat}");
            assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0, "d = {d}");
            lat += 0.09;
        }
    }

    #[test]
    fn nan_distance_never_wins() {
        let mut latch = WinLatch::default();
        assert!(!latch.check(f64::NAN, 16.0));
        assert!(!latch.won);
        let mut latch = WinLatch::default();
        let d = haversine_km(LatLng::new(-87.843, 10.0), LatLng::new(87.843, -170.0));
        assert!(!latch.check(d, 16.0));
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut latch = WinLatch::default();
        assert!(latch.check(16.0, 16.0));
    }
}
