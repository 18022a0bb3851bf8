//! Distortion
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, SignalSource},
    fader::InputFader,
    server::{BlockHandle, BlockServer},
    shaper::Disto,
};

pub const DRIVE: f32 = 0.3;
pub const SLOPE: f32 = 0.3;
pub const LEVEL: f32 = 0.65;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Linear, "drive", DRIVE, 0.0, 1.0, 0.05),
        PedalSetting::new(SettingUnit::Linear, "slope", SLOPE, 0.0, 0.99, 0.01),
        PedalSetting::new(SettingUnit::Linear, "level", LEVEL, 0.0, 1.0, 0.05),
    ]
}

pub struct Distortion {
    fader: BlockHandle,
    disto: BlockHandle,
}

impl Distortion {
    pub fn new(server: &BlockServer, input: SignalSource, drive: f32, slope: f32, level: f32) -> Distortion {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let disto = server.create(Disto::new(fader.source(), drive, slope, level, sr));
        Distortion { fader, disto }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Distortion {
        Self::new(
            server,
            input,
            setting_value(settings, "drive", DRIVE),
            setting_value(settings, "slope", SLOPE),
            setting_value(settings, "level", LEVEL),
        )
    }
}

impl Pedal for Distortion {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.disto]
    }
    fn output(&self) -> BlockId {
        self.disto.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "drive" => self.disto.set(BlockParam::Drive, value),
            "slope" => self.disto.set(BlockParam::Slope, value),
            "level" => self.disto.set(BlockParam::Mul, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_distortion {
    use super::*;

    #[test]
    fn level_caps_the_output() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut dist = Distortion::from_settings(&server, SignalSource::Instrument, &settings());
        dist.apply("drive", 1.0);
        dist.out(0);
        server.flush().unwrap();
        graph.process(&[2.0; 512]);
        assert!(graph.output(0).iter().all(|s| *s < LEVEL));
        assert!(graph.output(0)[511] > 0.6);
    }
}
