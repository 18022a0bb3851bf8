//! Footswitch and LED hardware
pub mod footswitch;
pub mod pedal_io;
pub mod status_light;
