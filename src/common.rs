//! Pieces shared by the whole pedal: error types and the settings file.
pub mod box_error;
pub mod config;
pub mod pedal_error;
