//! Tremolo: a sine on the amplitude of the input
//!
//! The sine swings between `1 - depth` and 1, so full depth takes the level
//! all the way to silence and back.
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    fader::InputFader,
    modulation::AmpMod,
    oscillator::Sine,
    server::{BlockHandle, BlockServer},
};

pub const FREQ: f32 = 6.0;
pub const DEPTH: f32 = 1.0;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Hertz, "freq", FREQ, 0.0, 20.0, 0.1).above(),
        PedalSetting::new(SettingUnit::Linear, "depth", DEPTH, 0.0, 1.0, 0.05),
    ]
}

pub struct Tremolo {
    fader: BlockHandle,
    lfo: BlockHandle,
    amp: BlockHandle,
}

impl Tremolo {
    pub fn new(server: &BlockServer, input: SignalSource, freq: f32, depth: f32) -> Tremolo {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let lfo = server.create(
            Sine::new(freq, sr)
                .with_mul(Control::Fixed(depth / 2.0))
                .with_add(1.0 - depth / 2.0),
        );
        let amp = server.create(AmpMod::new(fader.source(), Control::Signal(lfo.source())));
        Tremolo { fader, lfo, amp }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Tremolo {
        Self::new(
            server,
            input,
            setting_value(settings, "freq", FREQ),
            setting_value(settings, "depth", DEPTH),
        )
    }
}

impl Pedal for Tremolo {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.lfo, &mut self.amp]
    }
    fn output(&self) -> BlockId {
        self.amp.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "freq" => self.lfo.set(BlockParam::Freq, value),
            "depth" => {
                self.lfo.set(BlockParam::Mul, value / 2.0);
                self.lfo.set(BlockParam::Add, 1.0 - value / 2.0);
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_tremolo {
    use super::*;

    #[test]
    fn level_swings_to_silence() {
        let (server, mut graph) = BlockServer::open(1000.0);
        let mut trem = Tremolo::new(&server, SignalSource::Instrument, 10.0, 1.0);
        trem.out(0);
        server.flush().unwrap();
        graph.process(&[0.5; 100]);
        let out = graph.output(0);
        let max = out.iter().fold(0.0_f32, |m, s| m.max(*s));
        let min = out.iter().fold(1.0_f32, |m, s| m.min(*s));
        println!("max {} min {}", max, min);
        assert!(max > 0.49 && max <= 0.5);
        assert!(min < 0.01 && min >= 0.0);
    }

    #[test]
    fn zero_depth_is_flat() {
        let (server, mut graph) = BlockServer::open(1000.0);
        let mut trem = Tremolo::new(&server, SignalSource::Instrument, 10.0, 1.0);
        trem.apply("depth", 0.0);
        trem.out(0);
        server.flush().unwrap();
        graph.process(&[0.5; 50]);
        assert!(graph.output(0).iter().all(|s| *s == 0.5));
    }
}
