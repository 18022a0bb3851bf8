use crate::{common::config::PedalConfig, signal::server::BlockServer};

/// Everything the pedal owns at runtime, made once at startup and handed to
/// the bank and the poll loop
pub struct ProcessContext {
    pub config: PedalConfig,
    pub server: BlockServer,
}

impl ProcessContext {
    pub fn new(config: PedalConfig, server: BlockServer) -> ProcessContext {
        ProcessContext { config, server }
    }
}
