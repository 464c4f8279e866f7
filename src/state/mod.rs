pub mod heading;
pub mod pan;
pub mod proximity;
pub mod session;
pub mod touch;
pub mod velocity;

pub use session::FlightSession;
