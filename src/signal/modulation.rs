//! Blocks that modulate their input: amplitude and frequency
use super::block::{BlockParam, Control, Node, SignalSource, Signals};
use crate::dsp::hilbert::Hilbert;

/// input times amplitude
pub struct AmpMod {
    source: SignalSource,
    amp: Control,
}

impl AmpMod {
    pub fn new(source: SignalSource, amp: Control) -> AmpMod {
        AmpMod { source, amp }
    }
}

impl Node for AmpMod {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let amp = signals.control(self.amp);
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                *samp = input.get(i).copied().unwrap_or(0.0) * amp.at(i);
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        if let BlockParam::Mul = param {
            self.amp = Control::Fixed(value);
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}

/// Single sideband frequency shifter.  Every partial moves by `shift` Hz,
/// which is what makes a modulated shift sound like vibrato.
pub struct FreqShift {
    source: SignalSource,
    shift: Control,
    hilbert: Hilbert,
    phase: f32,
    sample_rate: f32,
}

impl FreqShift {
    pub fn new(source: SignalSource, shift: Control, sample_rate: f32) -> FreqShift {
        FreqShift {
            source,
            shift,
            hilbert: Hilbert::new(),
            phase: 0.0,
            sample_rate,
        }
    }
}

impl Node for FreqShift {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let input = signals.channel(self.source);
        let shift = signals.control(self.shift);
        let two_pi = 2.0 * std::f32::consts::PI;
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let (re, im) = self.hilbert.get_sample(input.get(i).copied().unwrap_or(0.0));
                *samp = re * self.phase.cos() - im * self.phase.sin();
                self.phase += two_pi * shift.at(i) / self.sample_rate;
                self.phase = self.phase.rem_euclid(two_pi);
            }
        }
    }
    fn set(&mut self, param: BlockParam, value: f32) {
        if let BlockParam::Shift = param {
            self.shift = Control::Fixed(value);
        }
    }
    fn set_input(&mut self, source: SignalSource, _fadetime: f32) {
        self.source = source;
    }
}

#[cfg(test)]
mod test_modulation {
    use super::*;
    use crate::signal::block::BlockId;
    use std::collections::BTreeMap;

    #[test]
    fn amp_follows_control_block() {
        let input = vec![0.5; 4];
        let silence = vec![0.0; 4];
        let mut blocks = BTreeMap::new();
        blocks.insert(BlockId(3), vec![vec![0.0, 1.0, 2.0, 0.5]]);
        let signals = Signals::new(&input, &blocks, &silence);
        let mut amp = AmpMod::new(
            SignalSource::Instrument,
            Control::Signal(SignalSource::Block(BlockId(3))),
        );
        let mut out = vec![vec![0.0; 4]];
        amp.render(&signals, &mut out);
        assert_eq!(out[0], vec![0.0, 0.5, 1.0, 0.25]);
    }

    #[test]
    fn zero_shift_keeps_level() {
        let sample_rate = 48_000.0;
        let input: Vec<f32> = (0..4800)
            .map(|n| f32::sin(2.0 * std::f32::consts::PI * 440.0 * n as f32 / sample_rate))
            .collect();
        let silence = vec![0.0; 4800];
        let blocks = BTreeMap::new();
        let signals = Signals::new(&input, &blocks, &silence);
        let mut shifter = FreqShift::new(SignalSource::Instrument, Control::Fixed(0.0), sample_rate);
        let mut out = vec![vec![0.0; 4800]];
        shifter.render(&signals, &mut out);
        let peak = out[0][2400..].iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        println!("peak: {}", peak);
        assert!(peak > 0.9 && peak < 1.1);
    }
}
