pub mod leaflet;

pub use crate::config::LatLng;
pub use leaflet::{LeafletHandle, disable_interactions, init_map};

/// The slice of the mapping widget the frame loop needs.
pub trait MapWidget {
    /// Shifts the view by `(dx, dy)` pixels, unanimated and with zero duration.
    fn pan_by(&mut self, dx: f64, dy: f64);
    fn center(&self) -> LatLng;
}
