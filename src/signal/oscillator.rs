//! Signal sources: a constant and a sine oscillator
use super::block::{BlockParam, Control, Node, Signals};
use crate::dsp::low_freq_osc::{LowFreqOsc, WaveShape};

/// Constant value times mul.  Used as a depth knob other blocks can read.
pub struct Sig {
    value: f32,
    mul: f32,
}

impl Sig {
    pub fn new(value: f32, mul: f32) -> Sig {
        Sig { value, mul }
    }
}

impl Node for Sig {
    fn render(&mut self, _signals: &Signals, out: &mut [Vec<f32>]) {
        let level = self.value * self.mul;
        for chan in out.iter_mut() {
            chan.fill(level);
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Value => self.value = value,
            BlockParam::Mul => self.mul = value,
            _ => (),
        }
    }
}

/// `add + mul * sin(2 pi freq t + phase)`, with `mul` optionally driven by
/// another block
pub struct Sine {
    osc: LowFreqOsc<f32>,
    mul: Control,
    add: f32,
}

impl Sine {
    pub fn new(freq: f32, sample_rate: f32) -> Sine {
        let mut osc = LowFreqOsc::new();
        osc.init(WaveShape::Sine, freq, 1.0, sample_rate);
        Sine {
            osc,
            mul: Control::Fixed(1.0),
            add: 0.0,
        }
    }
    pub fn with_mul(mut self, mul: Control) -> Sine {
        self.mul = mul;
        self
    }
    pub fn with_add(mut self, add: f32) -> Sine {
        self.add = add;
        self
    }
    /// Start offset as a fraction of a cycle
    pub fn with_phase(mut self, phase: f32) -> Sine {
        self.osc.set_phase(phase);
        self
    }
}

impl Node for Sine {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let mul = signals.control(self.mul);
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                *samp = self.add + mul.at(i) * self.osc.get_sample();
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Freq => self.osc.set_freq(value),
            BlockParam::Phase => self.osc.set_phase(value),
            BlockParam::Mul => self.mul = Control::Fixed(value),
            BlockParam::Add => self.add = value,
            _ => (),
        }
    }
}
