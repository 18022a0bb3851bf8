//! Audio effect units and the bank the footswitches select from
//!
//! Each effect file holds the wiring of one composite effect over the
//! primitive blocks in [`crate::signal`], its knob list and the defaults.
//! [`effect_unit::EffectUnit`] gives all of them the same lifecycle and
//! parameter interface, and [`effect_bank::EffectBank`] keeps exactly one of
//! them on the outputs.
pub mod auto_wah;
pub mod chorus;
pub mod clean;
pub mod controls;
pub mod delay;
pub mod distortion;
pub mod effect_bank;
pub mod effect_unit;
pub mod flanger;
pub mod freq_shift;
pub mod pedal;
pub mod phaser;
pub mod reverb;
pub mod rotary;
pub mod tremolo;
pub mod vibrato;
