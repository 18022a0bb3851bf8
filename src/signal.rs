//! Primitive signal blocks and the engine that renders them
//!
//! The control side (effect units, the bank, the poll loop) never touches
//! audio.  It owns [`BlockHandle`](server::BlockHandle)s and every call on a
//! handle queues a [`BlockCommand`](block::BlockCommand).  Once per poll tick
//! the [`BlockServer`](server::BlockServer) flushes the queue as one batch to
//! the [`SignalGraph`](graph::SignalGraph), which lives on the audio thread and
//! applies a whole batch between two buffers.
//!
//! ```text
//!   poll loop ──► EffectBank ──► BlockHandle ──► outbox ──flush──► mpsc ──► SignalGraph (jack thread)
//! ```
pub mod block;
pub mod chorus;
pub mod delay;
pub mod fader;
pub mod filter;
pub mod graph;
pub mod mixer;
pub mod modulation;
pub mod oscillator;
pub mod reverb;
pub mod server;
pub mod shaper;
