//! Eight voice chorus
//!
//! Each voice is a short delay swept by its own slow sine.  Base delays and
//! rates are staggered so the voices never line up.  `depth` is the sweep in
//! milliseconds either side of the base delay, `bal` the wet share of the
//! output.
use super::block::{BlockParam, Node, SignalSource, Signals};
use crate::dsp::{
    delay_line::DelayLine,
    low_freq_osc::{LowFreqOsc, WaveShape},
};

const BASE_DELAYS_MS: [f32; 8] = [7.1, 8.3, 9.2, 10.4, 11.3, 12.7, 13.9, 15.1];
const RATES: [f32; 8] = [0.18, 0.23, 0.31, 0.37, 0.43, 0.51, 0.59, 0.67];
pub const MAX_DEPTH: f32 = 5.0;

struct ChorusVoice {
    line: DelayLine,
    lfo: LowFreqOsc<f32>,
    base: f32,
}

pub struct Chorus {
    source: SignalSource,
    voices: Vec<ChorusVoice>,
    depth: f32,
    feedback: f32,
    bal: f32,
    // samples per millisecond
    ms: f32,
}

impl Chorus {
    pub fn new(source: SignalSource, depth: f32, feedback: f32, bal: f32, sample_rate: f32) -> Chorus {
        let ms = sample_rate / 1000.0;
        let longest = (BASE_DELAYS_MS[7] + MAX_DEPTH + 1.0) * ms;
        let voices = BASE_DELAYS_MS
            .iter()
            .zip(RATES.iter())
            .enumerate()
            .map(|(n, (base, rate))| {
                let mut lfo = LowFreqOsc::new();
                lfo.init(WaveShape::Sine, *rate, 1.0, sample_rate);
                lfo.set_phase(n as f32 / 8.0);
                ChorusVoice {
                    line: DelayLine::new(longest.ceil() as usize),
                    lfo,
                    base: *base,
                }
            })
            .collect();
        let mut chorus = Chorus {
            source,
            voices,
            depth: 0.0,
            feedback: 0.0,
            bal: 0.0,
            ms,
        };
        chorus.set(BlockParam::Depth, depth);
        chorus.set(BlockParam::Feedback, feedback);
        chorus.set(BlockParam::Balance, bal);
        chorus
    }
}

impl Node for Chorus {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let scale = 1.0 / self.voices.len() as f32;
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let dry = input.get(i).copied().unwrap_or(0.0);
                let mut wet = 0.0;
                for voice in self.voices.iter_mut() {
                    let delay_ms = voice.base + self.depth * voice.lfo.get_sample();
                    let tap = voice.line.read(delay_ms * self.ms - 1.0);
                    voice.line.push(dry + tap * self.feedback);
                    wet += tap;
                }
                *samp = dry * (1.0 - self.bal) + wet * scale * self.bal;
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Depth => self.depth = value.clamp(0.0, MAX_DEPTH),
            BlockParam::Feedback => self.feedback = value.clamp(0.0, 0.999),
            BlockParam::Balance => self.bal = value.clamp(0.0, 1.0),
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}
