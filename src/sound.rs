//! Audio device binding and process startup
pub mod client;
pub mod jack_thread;
