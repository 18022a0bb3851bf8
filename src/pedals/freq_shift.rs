//! Envelope driven frequency shifter: the harder the strings are hit the
//! further the whole spectrum moves up
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    fader::InputFader,
    filter::Follower,
    modulation,
    server::{BlockHandle, BlockServer},
};

pub const SENSITIVITY: f32 = 4200.0;
pub const BASE_SHIFT: f32 = 35.0;

const FOLLOW_FREQ: f32 = 45.0;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Hertz, "sensitivity", SENSITIVITY, 0.0, 10_000.0, 50.0),
        PedalSetting::new(SettingUnit::Hertz, "base_shift", BASE_SHIFT, -2000.0, 2000.0, 1.0),
    ]
}

pub struct FreqShift {
    fader: BlockHandle,
    follower: BlockHandle,
    shifter: BlockHandle,
}

impl FreqShift {
    pub fn new(server: &BlockServer, input: SignalSource, sensitivity: f32, base_shift: f32) -> FreqShift {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let follower = server.create(
            Follower::new(fader.source(), FOLLOW_FREQ, sr)
                .with_mul(sensitivity)
                .with_add(base_shift),
        );
        let shifter = server.create(modulation::FreqShift::new(
            fader.source(),
            Control::Signal(follower.source()),
            sr,
        ));
        FreqShift {
            fader,
            follower,
            shifter,
        }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> FreqShift {
        Self::new(
            server,
            input,
            setting_value(settings, "sensitivity", SENSITIVITY),
            setting_value(settings, "base_shift", BASE_SHIFT),
        )
    }
}

impl Pedal for FreqShift {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.follower, &mut self.shifter]
    }
    fn output(&self) -> BlockId {
        self.shifter.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "sensitivity" => self.follower.set(BlockParam::Mul, value),
            "base_shift" => self.follower.set(BlockParam::Add, value),
            _ => (),
        }
    }
}
