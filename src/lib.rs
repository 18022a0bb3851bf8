//! sfx_pedal - two footswitch guitar effects pedal
//!
//! A fixed bank of composite effects (flanger, vibrato, tremolo, rotary
//! speaker and friends) built from primitive signal blocks, a clean
//! passthrough for bypass, and the poll loop that reads the footswitches
//! and keeps exactly one of them on the outputs.
extern crate json;
#[macro_use]
extern crate num_derive;

pub mod common;
pub mod control;
pub mod dsp;
pub mod hw_control;
pub mod pedals;
pub mod signal;
pub mod sound;
pub mod utils;
