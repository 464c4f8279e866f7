pub mod app;
pub mod flight_view;
pub mod win_modal;
