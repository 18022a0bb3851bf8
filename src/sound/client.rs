//! Bring the pedal up and hand over to the poll loop
//!
//! Order matters: the sample rate comes from the audio device, the bank needs
//! the block server, and the gpio is only claimed once audio is running.  Any
//! failure before the loop returns an error with nothing playing and the LED
//! untouched.
use log::info;

use crate::{
    common::{
        box_error::BoxError,
        config::{pedal_defaults, Config, PedalConfig},
    },
    control::{context::ProcessContext, poll_loop::PollLoop},
    hw_control::pedal_io::GpioPedalIo,
    pedals::effect_bank::{default_bank, default_passthrough, EffectBank, UnitConfig},
    signal::{block::SignalSource, server::BlockServer},
    sound::jack_thread::AudioDevice,
};

/// Device outputs needed by the hungriest unit in a bank
pub fn channels_for(configs: &[UnitConfig]) -> usize {
    configs
        .iter()
        .map(|cfg| cfg.kind.output_channels())
        .max()
        .unwrap_or(1)
}

pub fn run(settings_file: &str) -> Result<(), BoxError> {
    let config = Config::build(settings_file.to_string(), pedal_defaults())?;
    let pedal_config = PedalConfig::from_config(&config)?;
    info!("pedal settings: {:?}", pedal_config);

    let configs = default_bank();
    let passthrough = default_passthrough();
    let device = AudioDevice::open(&pedal_config, channels_for(&configs))?;

    let (server, mut graph) = BlockServer::open(device.sample_rate());
    graph.set_output_channels(device.output_channels());
    let ctx = ProcessContext::new(pedal_config, server);
    let bank = EffectBank::build(&ctx.server, SignalSource::Instrument, &configs, &passthrough)?;

    let _audio = device.start(graph)?;
    let io = GpioPedalIo::bind(&ctx.config)?;

    let mut poll = PollLoop::new(ctx, bank, io);
    poll.run()
}

#[cfg(test)]
mod test_client {
    use super::*;
    use crate::pedals::effect_unit::EffectKind;

    #[test]
    fn rotary_needs_three_outputs() {
        assert_eq!(channels_for(&default_bank()), 3);
        assert_eq!(channels_for(&[UnitConfig::new(EffectKind::Tremolo)]), 1);
        assert_eq!(channels_for(&[]), 1);
    }

    #[test]
    fn bad_settings_name_stops_startup() {
        assert!(run("../not_here.json").is_err());
    }
}
