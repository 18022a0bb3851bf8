//! Sample level DSP algorithms used by the primitive signal blocks
//!
//! Nothing in here knows about blocks, handles or effect units.  Each piece
//! takes one sample in and gives one sample back.
pub mod allpass_delay;
pub mod biquad;
pub mod clip;
pub mod delay_line;
pub mod hilbert;
pub mod low_freq_osc;
pub mod smoothing_filter;
