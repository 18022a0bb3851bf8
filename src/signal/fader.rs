//! Input stage of every effect unit.  Swapping the source crossfades so a
//! change of instrument feed does not click.
use super::block::{BlockParam, Node, SignalSource, Signals};

pub struct InputFader {
    source: SignalSource,
    previous: Option<SignalSource>,
    fade_pos: usize,
    fade_len: usize,
    sample_rate: f32,
}

impl InputFader {
    pub fn new(source: SignalSource, sample_rate: f32) -> InputFader {
        InputFader {
            source,
            previous: None,
            fade_pos: 0,
            fade_len: 1,
            sample_rate,
        }
    }
}

impl Node for InputFader {
    fn render(&mut self, signals: &Signals, out: &mut [Vec<f32>]) {
        let current = signals.channel(self.source);
        let previous = self.previous.map(|src| signals.channel(src));
        if let Some(chan) = out.first_mut() {
            for (i, samp) in chan.iter_mut().enumerate() {
                let now = current.get(i).copied().unwrap_or(0.0);
                *samp = match previous {
                    Some(prev) if self.fade_pos < self.fade_len => {
                        let gain = self.fade_pos as f32 / self.fade_len as f32;
                        self.fade_pos += 1;
                        now * gain + prev.get(i).copied().unwrap_or(0.0) * (1.0 - gain)
                    }
                    _ => now,
                };
            }
        }
        if self.fade_pos >= self.fade_len {
            self.previous = None;
        }
    }
    fn set(&mut self, _param: BlockParam, _value: f32) {}
    fn set_input(&mut self, source: SignalSource, fadetime: f32) {
        if source == self.source {
            return;
        }
        self.previous = Some(self.source);
        self.source = source;
        self.fade_pos = 0;
        self.fade_len = ((fadetime.max(0.0) * self.sample_rate) as usize).max(1);
    }
}

#[cfg(test)]
mod test_input_fader {
    use super::*;
    use crate::signal::block::BlockId;
    use std::collections::BTreeMap;

    #[test]
    fn crossfades_to_new_source() {
        let input = vec![1.0; 8];
        let silence = vec![0.0; 8];
        let mut blocks = BTreeMap::new();
        blocks.insert(BlockId(4), vec![vec![0.0; 8]]);
        let signals = Signals::new(&input, &blocks, &silence);

        let mut fader = InputFader::new(SignalSource::Instrument, 8.0);
        let mut out = vec![vec![0.0; 8]];
        fader.render(&signals, &mut out);
        assert_eq!(out[0], vec![1.0; 8]);

        // half a second at 8Hz is a four sample ramp from the instrument down to block 4
        fader.set_input(SignalSource::Block(BlockId(4)), 0.5);
        fader.render(&signals, &mut out);
        assert_eq!(out[0], vec![1.0, 0.75, 0.5, 0.25, 0.0, 0.0, 0.0, 0.0]);
        assert!(fader.previous.is_none());
    }
}
