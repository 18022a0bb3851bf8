//! Chorus: eight swept delay voices under the dry signal
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, SignalSource},
    chorus::{self, MAX_DEPTH},
    fader::InputFader,
    server::{BlockHandle, BlockServer},
};

pub const DEPTH: f32 = 1.2;
pub const FEEDBACK: f32 = 0.6;
pub const BAL: f32 = 0.5;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Linear, "depth", DEPTH, 0.0, MAX_DEPTH, 0.05),
        PedalSetting::new(SettingUnit::Linear, "feedback", FEEDBACK, 0.0, 0.99, 0.01),
        PedalSetting::new(SettingUnit::Linear, "bal", BAL, 0.0, 1.0, 0.05),
    ]
}

pub struct Chorus {
    fader: BlockHandle,
    voices: BlockHandle,
}

impl Chorus {
    pub fn new(server: &BlockServer, input: SignalSource, depth: f32, feedback: f32, bal: f32) -> Chorus {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let voices = server.create(chorus::Chorus::new(fader.source(), depth, feedback, bal, sr));
        Chorus { fader, voices }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Chorus {
        Self::new(
            server,
            input,
            setting_value(settings, "depth", DEPTH),
            setting_value(settings, "feedback", FEEDBACK),
            setting_value(settings, "bal", BAL),
        )
    }
}

impl Pedal for Chorus {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![&mut self.fader, &mut self.voices]
    }
    fn output(&self) -> BlockId {
        self.voices.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "depth" => self.voices.set(BlockParam::Depth, value),
            "feedback" => self.voices.set(BlockParam::Feedback, value),
            "bal" => self.voices.set(BlockParam::Balance, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_chorus_pedal {
    use super::*;
    use crate::signal::block::BlockCommand;

    #[test]
    fn routes_the_voices() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut chorus = Chorus::from_settings(&server, SignalSource::Instrument, &settings());
        chorus.out(0);
        server.flush().unwrap();
        graph.process(&[0.2; 128]);
        assert_eq!(graph.routed_blocks(), vec![chorus.output()]);
        // half dry before any voice has come round
        assert!(graph.output(0).iter().all(|s| (*s - 0.1).abs() < 1e-6));
    }

    #[test]
    fn knobs_reach_the_block() {
        let (server, _graph) = BlockServer::open(48_000.0);
        let mut chorus = Chorus::from_settings(&server, SignalSource::Instrument, &settings());
        server.take_pending();
        chorus.apply("bal", 0.25);
        chorus.apply("nope", 1.0);
        let cmds = server.take_pending();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], BlockCommand::Set { param: BlockParam::Balance, value, .. } if value == 0.25));
    }
}
