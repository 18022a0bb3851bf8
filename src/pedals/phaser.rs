//! Phaser: twenty allpass stages swept by two slow sines
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    fader::InputFader,
    filter,
    oscillator::Sine,
    server::{BlockHandle, BlockServer},
};

pub const RATE: f32 = 0.1;
pub const SPREAD_RATE: f32 = 0.18;
pub const FEEDBACK: f32 = 0.5;

const STAGES: usize = 20;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Hertz, "rate", RATE, 0.0, 10.0, 0.01).above(),
        PedalSetting::new(SettingUnit::Hertz, "spread_rate", SPREAD_RATE, 0.0, 10.0, 0.01).above(),
        PedalSetting::new(SettingUnit::Linear, "feedback", FEEDBACK, 0.0, 0.99, 0.01),
    ]
}

pub struct Phaser {
    fader: BlockHandle,
    sweep: BlockHandle,
    spread: BlockHandle,
    phaser: BlockHandle,
}

impl Phaser {
    pub fn new(server: &BlockServer, input: SignalSource, rate: f32, spread_rate: f32, feedback: f32) -> Phaser {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let sweep = server.create(Sine::new(rate, sr).with_mul(Control::Fixed(65.0)).with_add(200.0));
        let spread = server.create(
            Sine::new(spread_rate, sr)
                .with_mul(Control::Fixed(0.6))
                .with_add(1.5),
        );
        let phaser = server.create(
            filter::Phaser::new(
                fader.source(),
                Control::Signal(sweep.source()),
                Control::Signal(spread.source()),
                STAGES,
                1.0,
                sr,
            )
            .with_feedback(feedback),
        );
        Phaser {
            fader,
            sweep,
            spread,
            phaser,
        }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Phaser {
        Self::new(
            server,
            input,
            setting_value(settings, "rate", RATE),
            setting_value(settings, "spread_rate", SPREAD_RATE),
            setting_value(settings, "feedback", FEEDBACK),
        )
    }
}

impl Pedal for Phaser {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.sweep, &mut self.spread, &mut self.phaser]
    }
    fn output(&self) -> BlockId {
        self.phaser.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "rate" => self.sweep.set(BlockParam::Freq, value),
            "spread_rate" => self.spread.set(BlockParam::Freq, value),
            "feedback" => self.phaser.set(BlockParam::Feedback, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_phaser_pedal {
    use super::*;

    #[test]
    fn builds_and_tunes() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut phaser = Phaser::from_settings(&server, SignalSource::Instrument, &settings());
        assert_eq!(server.pending(), 4);
        phaser.out(0);
        phaser.apply("spread_rate", 0.5);
        server.flush().unwrap();
        graph.process(&[0.5; 128]);
        assert_eq!(graph.routed_blocks(), vec![phaser.output()]);
        assert!(graph.output(0).iter().all(|s| s.is_finite()));
    }
}
