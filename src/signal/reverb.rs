//! Room reverb: eight damped feedback combs in parallel into four allpasses.
//!
//! Comb lengths scale with `size` and each comb's feedback is set so it dies
//! by 60dB in `time` seconds.  The lines are allocated for the biggest room
//! so changing the size never allocates on the audio thread.
use super::block::{BlockParam, Node, SignalSource, Signals};
use crate::dsp::{allpass_delay::AllpassDelay, delay_line::DelayLine, smoothing_filter::SmoothingFilter};

// tunings in samples at 44.1k
const COMBS: [f32; 8] = [1116.0, 1188.0, 1277.0, 1356.0, 1422.0, 1491.0, 1557.0, 1617.0];
const ALLPASSES: [f32; 4] = [556.0, 441.0, 341.0, 225.0];
const ALLPASS_GAIN: f32 = 0.5;
const DAMPING: f32 = 0.6;

pub const MIN_SIZE: f32 = 0.25;
pub const MAX_SIZE: f32 = 4.0;

struct Comb {
    line: DelayLine,
    damp: SmoothingFilter<f32>,
    tuning: f32,
    length: f32,
    feedback: f32,
}

pub struct Reverb {
    source: SignalSource,
    combs: Vec<Comb>,
    allpasses: Vec<AllpassDelay<f32>>,
    time: f32,
    size: f32,
    bal: f32,
    sample_rate: f32,
}

impl Reverb {
    pub fn new(source: SignalSource, time: f32, size: f32, bal: f32, sample_rate: f32) -> Reverb {
        let scale = sample_rate / 44_100.0;
        let combs = COMBS
            .iter()
            .map(|tuning| {
                let mut damp = SmoothingFilter::build(0.0, sample_rate);
                damp.set_coef(1.0 - DAMPING);
                Comb {
                    line: DelayLine::new((tuning * scale * MAX_SIZE).ceil() as usize),
                    damp,
                    tuning: tuning * scale,
                    length: 1.0,
                    feedback: 0.0,
                }
            })
            .collect();
        let allpasses = ALLPASSES
            .iter()
            .map(|len| AllpassDelay::new((len * scale) as usize, ALLPASS_GAIN))
            .collect();
        let mut reverb = Reverb {
            source,
            combs,
            allpasses,
            time: 1.0,
            size: 1.0,
            bal: 0.0,
            sample_rate,
        };
        reverb.set(BlockParam::Balance, bal);
        reverb.set(BlockParam::Size, size);
        reverb.set(BlockParam::Time, time);
        reverb
    }

    fn tune(&mut self) {
        for comb in self.combs.iter_mut() {
            comb.length = (comb.tuning * self.size).max(1.0);
            // 60dB down after `time` seconds of round trips
            let trips = self.time * self.sample_rate / comb.length;
            comb.feedback = 10.0_f32.powf(-3.0 / trips).min(0.999);
        }
    }
}

impl Node for Reverb {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let scale = 1.0 / self.combs.len() as f32;
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let dry = input.get(i).copied().unwrap_or(0.0);
                let mut wet = 0.0;
                for comb in self.combs.iter_mut() {
                    let tap = comb.line.read(comb.length - 1.0);
                    let damped = comb.damp.get(tap);
                    comb.line.push(dry + damped * comb.feedback);
                    wet += tap;
                }
                wet *= scale;
                for ap in self.allpasses.iter_mut() {
                    wet = ap.get_sample(wet);
                }
                *samp = dry * (1.0 - self.bal) + wet * self.bal;
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Time => {
                self.time = value.max(0.01);
                self.tune();
            }
            BlockParam::Size => {
                self.size = value.clamp(MIN_SIZE, MAX_SIZE);
                self.tune();
            }
            BlockParam::Balance => self.bal = value.clamp(0.0, 1.0),
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}
