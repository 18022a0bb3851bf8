//! Delay with a fractional, modulatable delay time and a feedback path
use super::block::{BlockParam, Control, Node, SignalSource, Signals};
use crate::dsp::delay_line::DelayLine;

pub struct Delay {
    source: SignalSource,
    delay: Control,
    feedback: f32,
    line: DelayLine,
    sample_rate: f32,
}

impl Delay {
    /// `max_delay` is in seconds and fixes the size of the line
    pub fn new(source: SignalSource, delay: Control, max_delay: f32, sample_rate: f32) -> Delay {
        let max_samples = (max_delay.max(0.0) * sample_rate).ceil() as usize;
        Delay {
            source,
            delay,
            feedback: 0.0,
            line: DelayLine::new(max_samples + 1),
            sample_rate,
        }
    }
    pub fn with_feedback(mut self, feedback: f32) -> Delay {
        self.set(BlockParam::Feedback, feedback);
        self
    }
}

impl Node for Delay {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let delay = signals.control(self.delay);
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                // tap is read before this sample goes in, so one sample is the minimum
                let samples = (delay.at(i) * self.sample_rate).max(1.0);
                let wet = self.line.read(samples - 1.0);
                let dry = input.get(i).copied().unwrap_or(0.0);
                self.line.push(dry + wet * self.feedback);
                *samp = wet;
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        match param {
            BlockParam::Delay => self.delay = Control::Fixed(value),
            BlockParam::Feedback => self.feedback = value.clamp(0.0, 0.999),
            _ => (),
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}

#[cfg(test)]
mod test_delay {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn impulse_comes_back_late() {
        let mut input = vec![0.0; 16];
        input[0] = 1.0;
        let silence = vec![0.0; 16];
        let blocks = BTreeMap::new();
        let signals = Signals::new(&input, &blocks, &silence);
        // 4 samples at 8Hz with half the level fed back
        let mut delay =
            Delay::new(SignalSource::Instrument, Control::Fixed(0.5), 1.0, 8.0).with_feedback(0.5);
        let mut out = vec![vec![0.0; 16]];
        delay.render(&signals, &mut out);
        println!("delay: {:?}", out[0]);
        assert_eq!(out[0][4], 1.0);
        assert_eq!(out[0][8], 0.5);
        assert_eq!(out[0][12], 0.25);
        assert_eq!(out[0][3], 0.0);
    }

    #[test]
    fn feedback_is_bounded() {
        let mut delay = Delay::new(SignalSource::Instrument, Control::Fixed(0.1), 0.5, 48_000.0);
        delay.set(BlockParam::Feedback, 3.0);
        assert!(delay.feedback < 1.0);
    }
}
