//! Boxed error used at the edges of the pedal (device binding, startup, threads).
//!
//! The jack process handler and the startup code mix errors from rppal, jack,
//! json and our own [`PedalError`](super::pedal_error::PedalError), so the
//! boundary functions just box whatever comes up.
pub type BoxError = std::boxed::Box<
    dyn std::error::Error // must implement Error to satisfy ?
        + std::marker::Send // handed across the jack thread
        + std::marker::Sync,
>;
