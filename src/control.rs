//! The footswitch state machine and the loop that drives it
pub mod context;
pub mod pedal_controller;
pub mod poll_loop;
