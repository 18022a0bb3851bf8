//! N voice by M output mixer.  Gain changes ramp over `time` seconds.
use super::block::{BlockParam, Node, SignalSource, Signals};

struct Voice {
    source: SignalSource,
    gains: Vec<f32>,
    targets: Vec<f32>,
    steps: Vec<f32>,
}

pub struct Mixer {
    voices: Vec<Voice>,
    outs: usize,
    time: f32,
    mul: f32,
    sample_rate: f32,
}

impl Mixer {
    pub fn new(outs: usize, time: f32, sample_rate: f32) -> Mixer {
        Mixer {
            voices: vec![],
            outs: outs.max(1),
            time,
            mul: 1.0,
            sample_rate,
        }
    }
    /// Add a voice with its gain into each output (missing gains are zero)
    pub fn with_voice(mut self, source: SignalSource, gains: &[f32]) -> Mixer {
        let mut levels = vec![0.0; self.outs];
        for (level, gain) in levels.iter_mut().zip(gains.iter()) {
            *level = *gain;
        }
        self.voices.push(Voice {
            source,
            gains: levels.clone(),
            targets: levels,
            steps: vec![0.0; self.outs],
        });
        self
    }
    pub fn with_mul(mut self, mul: f32) -> Mixer {
        self.mul = mul;
        self
    }
}

impl Node for Mixer {
    fn channels(&self) -> usize {
        self.outs
    }
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        for chan in out.iter_mut() {
            chan.fill(0.0);
        }
        for voice in self.voices.iter_mut() {
            let input = signals.channel(voice.source);
            for (o, chan) in out.iter_mut().enumerate().take(self.outs) {
                for (i, samp) in chan.iter_mut().enumerate() {
                    let gain = voice.gains[o];
                    if gain != voice.targets[o] {
                        let next = gain + voice.steps[o];
                        let done = (voice.steps[o] > 0.0 && next >= voice.targets[o])
                            || (voice.steps[o] <= 0.0 && next <= voice.targets[o]);
                        voice.gains[o] = if done { voice.targets[o] } else { next };
                    }
                    *samp += input.get(i).copied().unwrap_or(0.0) * voice.gains[o] * self.mul;
                }
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Gain { voice, out } => {
                let ramp = (self.time * self.sample_rate).max(1.0);
                if let Some(v) = self.voices.get_mut(voice) {
                    if out < v.targets.len() {
                        v.targets[out] = value;
                        v.steps[out] = (value - v.gains[out]) / ramp;
                    }
                }
            }
            BlockParam::Mul => self.mul = value,
            _ => (),
        }
    }
}

#[cfg(test)]
mod test_mixer {
    use super::*;
    use crate::signal::block::BlockId;
    use std::collections::BTreeMap;

    #[test]
    fn voices_land_on_their_outputs() {
        let input = vec![1.0; 4];
        let silence = vec![0.0; 4];
        let mut blocks = BTreeMap::new();
        blocks.insert(BlockId(2), vec![vec![0.5; 4]]);
        let signals = Signals::new(&input, &blocks, &silence);
        let mut mixer = Mixer::new(2, 0.05, 48_000.0)
            .with_voice(SignalSource::Instrument, &[1.0])
            .with_voice(SignalSource::Block(BlockId(2)), &[0.5, 1.0]);
        assert_eq!(mixer.channels(), 2);
        let mut out = vec![vec![0.0; 4]; 2];
        mixer.render(&signals, &mut out);
        assert_eq!(out[0], vec![1.25; 4]);
        assert_eq!(out[1], vec![0.5; 4]);
    }

    #[test]
    fn gain_change_ramps() {
        let input = vec![1.0; 8];
        let silence = vec![0.0; 8];
        let blocks = BTreeMap::new();
        let signals = Signals::new(&input, &blocks, &silence);
        // half a second at 8Hz is a four sample ramp
        let mut mixer = Mixer::new(1, 0.5, 8.0).with_voice(SignalSource::Instrument, &[0.0]);
        mixer.set(BlockParam::Gain { voice: 0, out: 0 }, 1.0);
        let mut out = vec![vec![0.0; 8]];
        mixer.render(&signals, &mut out);
        assert_eq!(out[0], vec![0.25, 0.5, 0.75, 1.0, 1.0, 1.0, 1.0, 1.0]);
        // unknown voices are ignored
        mixer.set(BlockParam::Gain { voice: 7, out: 0 }, 1.0);
    }
}
