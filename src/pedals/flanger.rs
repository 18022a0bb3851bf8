//! Flanger: a short delay swept by a slow oscillator, mixed with the dry input
//!
//! ```text
//!  fader ─┬──────────────────────────────► mix (1.0)
//!         └─► delay(time = lfo) ──────────► mix (0.9)
//!  depth(sig) ─► lfo(mul) ──┘
//! ```
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    delay::Delay,
    fader::InputFader,
    mixer::Mixer,
    oscillator::{Sig, Sine},
    server::{BlockHandle, BlockServer},
};

pub const DEPTH: f32 = 0.75;
pub const LFO_FREQ: f32 = 0.2;
pub const FEEDBACK: f32 = 0.5;

// seconds of sweep per unit of depth, also the centre of the sweep
const SWEEP: f32 = 0.005;
const MAX_DELAY: f32 = 1.5;
const DRY_GAIN: f32 = 1.0;
const WET_GAIN: f32 = 0.9;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Linear, "depth", DEPTH, 0.0, 1.0, 0.05),
        PedalSetting::new(SettingUnit::Hertz, "lfofreq", LFO_FREQ, 0.0, 20.0, 0.05).above(),
        PedalSetting::new(SettingUnit::Linear, "feedback", FEEDBACK, 0.0, 0.99, 0.01),
    ]
}

pub struct Flanger {
    fader: BlockHandle,
    depth: BlockHandle,
    lfo: BlockHandle,
    delay: BlockHandle,
    mix: BlockHandle,
}

impl Flanger {
    pub fn new(server: &BlockServer, input: SignalSource, depth: f32, lfofreq: f32, feedback: f32) -> Flanger {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let depth = server.create(Sig::new(depth, SWEEP));
        let lfo = server.create(
            Sine::new(lfofreq * 2.0, sr)
                .with_mul(Control::Signal(depth.source()))
                .with_add(SWEEP),
        );
        let delay = server.create(
            Delay::new(fader.source(), Control::Signal(lfo.source()), MAX_DELAY, sr).with_feedback(feedback),
        );
        let mix = server.create(
            Mixer::new(1, 0.05, sr)
                .with_voice(fader.source(), &[DRY_GAIN])
                .with_voice(delay.source(), &[WET_GAIN]),
        );
        Flanger {
            fader,
            depth,
            lfo,
            delay,
            mix,
        }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Flanger {
        Self::new(
            server,
            input,
            setting_value(settings, "depth", DEPTH),
            setting_value(settings, "lfofreq", LFO_FREQ),
            setting_value(settings, "feedback", FEEDBACK),
        )
    }
}

impl Pedal for Flanger {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        vec![
            &mut self.fader,
            &mut self.depth,
            &mut self.lfo,
            &mut self.delay,
            &mut self.mix,
        ]
    }
    fn output(&self) -> BlockId {
        self.mix.id()
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "depth" => self.depth.set(BlockParam::Value, value),
            "lfofreq" => self.lfo.set(BlockParam::Freq, value * 2.0),
            "feedback" => self.delay.set(BlockParam::Feedback, value),
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_flanger {
    use super::*;
    use crate::signal::block::BlockCommand;

    #[test]
    fn builds_five_blocks() {
        let (server, _graph) = BlockServer::open(48_000.0);
        let flanger = Flanger::from_settings(&server, SignalSource::Instrument, &settings());
        let cmds = server.take_pending();
        assert_eq!(cmds.len(), 5);
        assert!(cmds.iter().all(|c| matches!(c, BlockCommand::Create { .. })));
        assert_eq!(cmds[4].block_id(), flanger.output());
    }

    #[test]
    fn knobs_write_through() {
        let (server, _graph) = BlockServer::open(48_000.0);
        let mut flanger = Flanger::from_settings(&server, SignalSource::Instrument, &settings());
        server.take_pending();
        flanger.apply("lfofreq", 0.5);
        flanger.apply("feedback", 0.25);
        let cmds = server.take_pending();
        println!("cmds: {:?}", cmds);
        assert!(matches!(cmds[0], BlockCommand::Set { param: BlockParam::Freq, value, .. } if value == 1.0));
        assert_eq!(cmds[0].block_id(), flanger.lfo.id());
        assert_eq!(cmds[1].block_id(), flanger.delay.id());
    }

    #[test]
    fn dry_path_is_heard() {
        let (server, mut graph) = BlockServer::open(48_000.0);
        let mut flanger = Flanger::new(&server, SignalSource::Instrument, 0.0, 0.2, 0.0);
        flanger.out(0);
        server.flush().unwrap();
        let mut input = vec![0.0; 1024];
        input[0] = 1.0;
        graph.process(&input);
        // dry impulse up front, wet copy 5ms later at 0.9
        assert_eq!(graph.output(0)[0], 1.0);
        assert_eq!(graph.routed_blocks(), vec![flanger.output()]);
        let wet = graph.output(0)[230..250].iter().fold(0.0_f32, |m, s| m.max(*s));
        assert!(wet > 0.8);
    }
}
