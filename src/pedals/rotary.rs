//! Rotary speaker (Leslie)
//!
//! A tremolo, a phaser swept by two out of phase sines, and a vibrato, summed
//! at equal gain onto the first channel of a three channel mixer.  The sub
//! units read this unit's fader so a single `set_input` moves all three.
use super::{
    controls::{setting_value, PedalSetting, SettingUnit},
    pedal::Pedal,
    tremolo::Tremolo,
    vibrato::{self, Vibrato},
};
use crate::signal::{
    block::{BlockId, BlockParam, Control, SignalSource},
    fader::InputFader,
    filter::Phaser,
    mixer::Mixer,
    oscillator::Sine,
    server::{BlockHandle, BlockServer},
};

pub const DEPTH: f32 = 1.0;
pub const TREM_FREQ: f32 = 4.0;
pub const VIB_DEPTH: f32 = 6.0;

const SPREAD_RATE: f32 = 0.16;
const PHASER_STAGES: usize = 18;
const LEVEL: f32 = 0.7;

pub fn settings() -> Vec<PedalSetting> {
    vec![
        PedalSetting::new(SettingUnit::Linear, "depth", DEPTH, 0.0, 4.0, 0.05),
        PedalSetting::new(SettingUnit::Hertz, "trem_freq", TREM_FREQ, 0.0, 20.0, 0.1).above(),
        PedalSetting::new(SettingUnit::Hertz, "vib_depth", VIB_DEPTH, 0.0, 50.0, 0.5),
    ]
}

pub struct Rotary {
    fader: BlockHandle,
    trem: Tremolo,
    sweep: BlockHandle,
    spread: BlockHandle,
    phaser: BlockHandle,
    vib: Vibrato,
    mix: BlockHandle,
}

impl Rotary {
    pub fn new(server: &BlockServer, input: SignalSource, depth: f32, trem_freq: f32, vib_depth: f32) -> Rotary {
        let sr = server.sample_rate();
        let fader = server.create(InputFader::new(input, sr));
        let trem = Tremolo::new(server, fader.source(), trem_freq, 1.0);
        let sweep = server.create(Sine::new(0.2, sr).with_mul(Control::Fixed(70.0)).with_add(200.0));
        let spread = server.create(
            Sine::new(SPREAD_RATE * depth, sr)
                .with_phase(0.5)
                .with_mul(Control::Fixed(0.6))
                .with_add(1.5),
        );
        let phaser = server.create(
            Phaser::new(
                fader.source(),
                Control::Signal(sweep.source()),
                Control::Signal(spread.source()),
                PHASER_STAGES,
                1.0,
                sr,
            )
            .with_feedback(0.5)
            .with_mul(0.1),
        );
        let vib = Vibrato::new(server, fader.source(), vibrato::RATE, vib_depth);
        let mix = server.create(
            Mixer::new(3, 0.5, sr)
                .with_voice(SignalSource::Block(trem.output()), &[1.0])
                .with_voice(phaser.source(), &[1.0])
                .with_voice(SignalSource::Block(vib.output()), &[1.0])
                .with_mul(LEVEL),
        );
        Rotary {
            fader,
            trem,
            sweep,
            spread,
            phaser,
            vib,
            mix,
        }
    }
    pub fn from_settings(server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Rotary {
        Self::new(
            server,
            input,
            setting_value(settings, "depth", DEPTH),
            setting_value(settings, "trem_freq", TREM_FREQ),
            setting_value(settings, "vib_depth", VIB_DEPTH),
        )
    }
}

impl Pedal for Rotary {
    fn chain(&mut self) -> Vec<&mut BlockHandle> {
        let mut chain = vec![&mut self.fader];
        chain.extend(self.trem.chain());
        chain.push(&mut self.sweep);
        chain.push(&mut self.spread);
        chain.push(&mut self.phaser);
        chain.extend(self.vib.chain());
        chain.push(&mut self.mix);
        chain
    }
    fn output(&self) -> BlockId {
        self.mix.id()
    }
    fn output_channels(&self) -> usize {
        3
    }
    fn apply(&mut self, name: &str, value: f32) {
        match name {
            "depth" => self.spread.set(BlockParam::Freq, SPREAD_RATE * value),
            "trem_freq" => self.trem.apply("freq", value),
            "vib_depth" => self.vib.apply("depth", value),
            _ => (),
        }
    }
}
