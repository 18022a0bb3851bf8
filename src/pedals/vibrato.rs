//! Vibrato: pitch wobble from a frequency shifter swept by a sine.  Fully wet.
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    fader::InputFader,
    modulation::FreqShift,
    oscillator::Sine,
    server::{BlockHandle, BlockServer},
};

pub const RATE: f32 = 5.0;
/// Hz of shift at the peak of the sweep
pub const DEPTH: f32 = 10.0;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Hertz, "rate", RATE, 0.0, 20.0, 0.1).above(),
        PedalSetting::new(SettingUnit::Hertz, "depth", DEPTH, 0.0, 50.0, 0.5),
    ]
}

pub struct Vibrato {
    fader: BlockHandle,
    lfo: BlockHandle,
    shift: BlockHandle,
}

impl Vibrato {
    pub fn new(server: &BlockServer, input: SignalSource, rate: f32, depth: f32) -> Vibrato {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let lfo = server.create(Sine::new(rate, sr).with_mul(Control::Fixed(depth)));
        let shift = server.create(FreqShift::new(
            fader.source(),
            Control::Signal(lfo.source()),
            sr,
        ));
        Vibrato { fader, lfo, shift }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Vibrato {
        Self::new(
            server,
            input,
            setting_value(settings, "rate", RATE),
            setting_value(settings, "depth", DEPTH),
        )
    }
}

impl Pedal for Vibrato {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.lfo, &mut self.shift]
    }
    fn output(&self) -> BlockId {
        self.shift.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "rate" => self.lfo.set(BlockParam::Freq, value),
            "depth" => self.lfo.set(BlockParam::Mul, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_vibrato {
    use super::*;
    use crate::signal::block::{BlockCommand, BlockState};

    #[test]
    fn depth_goes_to_the_sweep() {
        let (server, _graph) = BlockServer::open(48_000.0);
        let mut vib = Vibrato::from_settings(&server, SignalSource::Instrument, &settings());
        assert_eq!(server.take_pending().len(), 3);
        vib.apply("depth", 6.0);
        vib.apply("nothing", 6.0);
        let cmds = server.take_pending();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].block_id(), vib.lfo.id());
        assert!(matches!(cmds[0], BlockCommand::Set { param: BlockParam::Mul, .. }));
    }

    #[test]
    fn starts_sources_first() {
        let (server, _graph) = BlockServer::open(48_000.0);
        let mut vib = Vibrato::new(&server, SignalSource::Instrument, RATE, DEPTH);
        server.take_pending();
        vib.out(0);
        let cmds = server.take_pending();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds[2], BlockCommand::Out { .. }));
        assert_eq!(cmds[2].block_id(), vib.output());
        vib.stop();
        let cmds = server.take_pending();
        // output goes quiet before its sources
        assert_eq!(cmds[0].block_id(), vib.output());
        assert_eq!(vib.shift.state(), BlockState::Stopped);
    }
}
