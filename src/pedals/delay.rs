//! Echo: a feedback delay mixed under the dry signal
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    delay,
    fader::InputFader,
    mixer::Mixer,
    server::{BlockHandle, BlockServer},
};

pub const DELAY: f32 = 0.6;
pub const FEEDBACK: f32 = 0.3;
pub const LEVEL: f32 = 0.5;
pub const MAX_DELAY: f32 = 0.8;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Seconds, "delay", DELAY, 0.0, MAX_DELAY, 0.01).above(),
        PedalSetting::new(SettingUnit::Linear, "feedback", FEEDBACK, 0.0, 0.99, 0.01),
        PedalSetting::new(SettingUnit::Linear, "level", LEVEL, 0.0, 1.0, 0.05),
    ]
}

pub struct Delay {
    fader: BlockHandle,
    echo: BlockHandle,
    mix: BlockHandle,
}

impl Delay {
    pub fn new(server: &BlockServer, input: SignalSource, time: f32, feedback: f32, level: f32) -> Delay {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let echo = server.create(
            delay::Delay::new(fader.source(), Control::Fixed(time), MAX_DELAY, sr).with_feedback(feedback),
        );
        let mix = server.create(
            Mixer::new(1, 0.05, sr)
                .with_voice(fader.source(), &[1.0])
                .with_voice(echo.source(), &[level]),
        );
        Delay { fader, echo, mix }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Delay {
        Self::new(
            server,
            input,
            setting_value(settings, "delay", DELAY),
            setting_value(settings, "feedback", FEEDBACK),
            setting_value(settings, "level", LEVEL),
        )
    }
}

impl Pedal for Delay {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.echo, &mut self.mix]
    }
    fn output(&self) -> BlockId {
        self.mix.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "delay" => self.echo.set(BlockParam::Delay, value),
            "feedback" => self.echo.set(BlockParam::Feedback, value),
            "level" => self.mix.set(BlockParam::Gain { voice: 1, out: 0 }, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_delay_pedal {
    use super::*;

    #[test]
    fn echo_follows_the_dry_hit() {
        let (server, mut graph) = BlockServer::open(100.0);
        let mut echo = Delay::new(&server, SignalSource::Instrument, 0.1, 0.0, 0.5);
        echo.out(0);
        server.flush().unwrap();
        let mut input = vec![0.0; 20];
        input[0] = 1.0;
        graph.process(&input);
        let out = graph.output(0);
        println!("out: {:?}", out);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[10], 0.5);
        assert_eq!(out[5], 0.0);
    }
}
