//! Envelope filter (auto-wah): a resonant lowpass whose corner follows how
//! hard the strings are hit
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::{
    dsp::biquad::FilterType,
    signal::{
        block::{BlockId, BlockParam, Control, SignalSource},
        fader::InputFader,
        filter::{Biquad, Follower},
        server::{BlockHandle, BlockServer},
    },
};

pub const SENSITIVITY: f32 = 4200.0;
pub const BASE_FREQ: f32 = 35.0;
pub const Q: f32 = 7.0;

// corner of the envelope follower's smoothing
const FOLLOW_FREQ: f32 = 45.0;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Hertz, "sensitivity", SENSITIVITY, 0.0, 10_000.0, 50.0),
        PedalSetting::new(SettingUnit::Hertz, "base_freq", BASE_FREQ, 0.0, 2000.0, 5.0).above(),
        PedalSetting::new(SettingUnit::Linear, "q", Q, 0.0, 20.0, 0.1).above(),
    ]
}

pub struct AutoWah {
    fader: BlockHandle,
    follower: BlockHandle,
    wah: BlockHandle,
}

impl AutoWah {
    pub fn new(server: &BlockServer, input: SignalSource, sensitivity: f32, base_freq: f32, q: f32) -> AutoWah {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let follower = server.create(
            Follower::new(fader.source(), FOLLOW_FREQ, sr)
                .with_mul(sensitivity)
                .with_add(base_freq),
        );
        let wah = server.create(Biquad::new(
            fader.source(),
            FilterType::LowPass,
            Control::Signal(follower.source()),
            q,
            sr,
        ));
        AutoWah {
            fader,
            follower,
            wah,
        }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> AutoWah {
        Self::new(
            server,
            input,
            setting_value(settings, "sensitivity", SENSITIVITY),
            setting_value(settings, "base_freq", BASE_FREQ),
            setting_value(settings, "q", Q),
        )
    }
}

impl Pedal for AutoWah {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.follower, &mut self.wah]
    }
    fn output(&self) -> BlockId {
        self.wah.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "sensitivity" => self.follower.set(BlockParam::Mul, value),
            "base_freq" => self.follower.set(BlockParam::Add, value),
            "q" => self.wah.set(BlockParam::Q, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_auto_wah {
    use super::*;
    use crate::signal::block::BlockState;

    #[test]
    fn follower_runs_with_the_filter() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut wah = AutoWah::from_settings(&server, SignalSource::Instrument, &settings());
        wah.out(0);
        server.flush().unwrap();
        graph.process(&[0.3; 256]);
        assert_eq!(graph.block_state(wah.follower.id()), Some(BlockState::Playing));
        assert_eq!(graph.routed_blocks(), vec![wah.output()]);
        assert!(graph.output(0).iter().all(|s| s.is_finite()));
    }
}
