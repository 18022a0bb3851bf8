//! Waveshaping distortion
use super::block::{BlockParam, Node, SignalSource, Signals};
use crate::dsp::{
    clip::{clip_sample, ClipType},
    smoothing_filter::SmoothingFilter,
};

/// Soft clipper with a drive amount and a one pole tone control.
/// `drive` and `slope` are both 0..1, higher slope is darker.
pub struct Disto {
    source: SignalSource,
    drive: f32,
    slope: f32,
    mul: f32,
    tone: SmoothingFilter<f32>,
}

impl Disto {
    pub fn new(source: SignalSource, drive: f32, slope: f32, mul: f32, sample_rate: f32) -> Disto {
        let mut disto = Disto {
            source,
            drive: 0.0,
            slope: 0.0,
            mul,
            tone: SmoothingFilter::build(0.0, sample_rate),
        };
        disto.set(BlockParam::Drive, drive);
        disto.set(BlockParam::Slope, slope);
        disto
    }
    fn gain(&self) -> f32 {
        // 1 at no drive, heading to 100 at full drive
        1.0 + 99.0 * self.drive * self.drive
    }
}

impl Node for Disto {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let gain = self.gain();
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let driven = gain * input.get(i).copied().unwrap_or(0.0);
                let shaped = clip_sample(&ClipType::Soft, driven);
                *samp = self.tone.get(shaped) * self.mul;
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Drive => self.drive = value.clamp(0.0, 1.0),
            BlockParam::Slope => {
                self.slope = value.clamp(0.0, 0.99);
                self.tone.set_coef(1.0 - self.slope);
            }
            BlockParam::Mul => self.mul = value,
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}
