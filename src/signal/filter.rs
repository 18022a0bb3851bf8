//! Filter blocks: a modulatable biquad, a multi stage phaser and an envelope
//! follower to drive them
use super::block::{BlockParam, Control, Node, SignalSource, Signals};
use crate::{
    dsp::{
        biquad::{BiQuadFilter, FilterType},
        smoothing_filter::SmoothingFilter,
    },
    utils::freq_to_time_const,
};

/// Biquad whose cutoff can follow another block.  The cutoff is picked up
/// once per buffer.
pub struct Biquad {
    source: SignalSource,
    freq: Control,
    filter: BiQuadFilter,
}

impl Biquad {
    pub fn new(
        source: SignalSource,
        filter_type: FilterType,
        freq: Control,
        q: f32,
        sample_rate: f32,
    ) -> Biquad {
        let mut filter = BiQuadFilter::new();
        let start = match freq {
            Control::Fixed(f) => f,
            Control::Signal(_) => 1000.0,
        };
        filter.init(filter_type, start as f64, q as f64, sample_rate as f64);
        Biquad {
            source,
            freq,
            filter,
        }
    }
}

impl Node for Biquad {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let cutoff = signals.control(self.freq).at(0) as f64;
        if cutoff != self.filter.cutoff_freq {
            self.filter.set_cutoff(cutoff);
        }
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                *samp = self.filter.get_sample(input.get(i).copied().unwrap_or(0.0));
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Freq => {
                self.freq = Control::Fixed(value);
                self.filter.set_cutoff(value as f64);
            }
            BlockParam::Q => {
                self.filter.q = value as f64;
                let cutoff = self.filter.cutoff_freq;
                self.filter.set_cutoff(cutoff);
            }
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}

/// Cascade of allpass stages mixed back with the dry input.  Stage `k` sits at
/// `freq * (k + 1) ^ spread`, so the notches spread out as `spread` rises.
pub struct Phaser {
    source: SignalSource,
    freq: Control,
    spread: Control,
    feedback: f32,
    mul: f32,
    stages: Vec<BiQuadFilter>,
    last: f32,
}

impl Phaser {
    pub fn new(
        source: SignalSource,
        freq: Control,
        spread: Control,
        num: usize,
        q: f32,
        sample_rate: f32,
    ) -> Phaser {
        let stages = (0..num.max(1))
            .map(|k| {
                let mut stage = BiQuadFilter::new();
                stage.init(
                    FilterType::AllPass,
                    200.0 * (k + 1) as f64,
                    q as f64,
                    sample_rate as f64,
                );
                stage
            })
            .collect();
        Phaser {
            source,
            freq,
            spread,
            feedback: 0.0,
            mul: 1.0,
            stages,
            last: 0.0,
        }
    }
    pub fn with_feedback(mut self, feedback: f32) -> Phaser {
        self.set(BlockParam::Feedback, feedback);
        self
    }
    pub fn with_mul(mut self, mul: f32) -> Phaser {
        self.mul = mul;
        self
    }
    fn tune(&mut self, base: f32, spread: f32) {
        for (k, stage) in self.stages.iter_mut().enumerate() {
            let freq = base as f64 * ((k + 1) as f64).powf(spread as f64);
            stage.set_cutoff(freq);
        }
    }
}

impl Node for Phaser {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let base = signals.control(self.freq).at(0);
        let spread = signals.control(self.spread).at(0);
        self.tune(base, spread);
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let dry = input.get(i).copied().unwrap_or(0.0);
                let mut wet = dry + self.last * self.feedback;
                for stage in self.stages.iter_mut() {
                    wet = stage.get_sample(wet);
                }
                self.last = wet;
                *samp = (dry + wet) * 0.5 * self.mul;
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Freq => self.freq = Control::Fixed(value),
            BlockParam::Spread => self.spread = Control::Fixed(value),
            BlockParam::Feedback => self.feedback = value.clamp(0.0, 0.999),
            BlockParam::Mul => self.mul = value,
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}

/// Amplitude envelope of the input, scaled by `mul` and offset by `add`
pub struct Follower {
    source: SignalSource,
    envelope: SmoothingFilter<f32>,
    mul: f32,
    add: f32,
}

impl Follower {
    pub fn new(source: SignalSource, freq: f32, sample_rate: f32) -> Follower {
        Follower {
            source,
            envelope: SmoothingFilter::build(freq_to_time_const(freq), sample_rate),
            mul: 1.0,
            add: 0.0,
        }
    }
    pub fn with_mul(mut self, mul: f32) -> Follower {
        self.mul = mul;
        self
    }
    pub fn with_add(mut self, add: f32) -> Follower {
        self.add = add;
        self
    }
}

impl Node for Follower {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let level = self.envelope.get(input.get(i).copied().unwrap_or(0.0).abs());
                *samp = self.add + self.mul * level;
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Mul => self.mul = value,
            BlockParam::Add => self.add = value,
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}

#[cfg(test)]
mod test_filter {
    use super::*;
    use std::collections::BTreeMap;

    fn run(node: &mut dyn Node, input: &[f32]) -> Vec<f32> {
        let silence = vec![0.0; input.len()];
        let blocks = BTreeMap::new();
        let signals = Signals::new(input, &blocks, &silence);
        let mut out = vec![vec![0.0; input.len()]];
        node.render(&signals, &mut out);
        out.remove(0)
    }

    #[test]
    fn lowpass_block_passes_dc() {
        let mut lp = Biquad::new(
            SignalSource::Instrument,
            FilterType::LowPass,
            Control::Fixed(500.0),
            0.707,
            48_000.0,
        );
        let out = run(&mut lp, &vec![1.0; 48_000]);
        assert!((out[47_999] - 1.0).abs() < 1e-3);
        lp.set(BlockParam::Q, 7.0);
        assert_eq!(lp.filter.q, 7.0);
    }

    #[test]
    fn phaser_keeps_dc() {
        // allpasses leave dc alone, so dry plus wet over two is still dc
        let mut phaser = Phaser::new(
            SignalSource::Instrument,
            Control::Fixed(200.0),
            Control::Fixed(1.5),
            18,
            1.0,
            48_000.0,
        );
        let out = run(&mut phaser, &vec![0.5; 48_000]);
        assert!((out[47_999] - 0.5).abs() < 1e-2);
        // highest stage stays under nyquist
        assert!(phaser.stages[17].cutoff_freq < 24_000.0);
    }

    #[test]
    fn follower_tracks_level() {
        let mut follower = Follower::new(SignalSource::Instrument, 45.0, 48_000.0)
            .with_mul(1000.0)
            .with_add(35.0);
        let quiet = run(&mut follower, &vec![0.0; 100]);
        assert_eq!(quiet[99], 35.0);
        let loud = run(&mut follower, &vec![-0.5; 48_000]);
        assert!((loud[47_999] - 535.0).abs() < 1.0);
    }
}
