pub mod control_surface;
pub mod controller;
