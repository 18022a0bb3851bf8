//! Circular delay line with a fractional read tap
//!
//! The flanger sweeps its tap a few samples at a time, so reads interpolate
//! linearly between the two nearest stored samples.

pub struct DelayLine {
    buffer: Vec<f32>,
    write_index: usize,
}

impl DelayLine {
    /// Enough room for `max_delay` samples plus the interpolation neighbour
    pub fn new(max_delay: usize) -> DelayLine {
        DelayLine {
            buffer: vec![0.0; max_delay.max(1) + 2],
            write_index: 0,
        }
    }
    pub fn max_delay(&self) -> f32 {
        (self.buffer.len() - 2) as f32
    }
    pub fn push(&mut self, sample: f32) -> () {
        self.write_index = (self.write_index + 1) % self.buffer.len();
        self.buffer[self.write_index] = sample;
    }
    /// Sample from `delay` samples ago (1.0 is the previous push)
    pub fn read(&self, delay: f32) -> f32 {
        let delay = delay.clamp(0.0, self.max_delay());
        let whole = delay.floor();
        let frac = delay - whole;
        let len = self.buffer.len();
        let first = (self.write_index + len - whole as usize) % len;
        let second = (first + len - 1) % len;
        self.buffer[first] * (1.0 - frac) + self.buffer[second] * frac
    }
    pub fn clear(&mut self) -> () {
        for samp in self.buffer.iter_mut() {
            *samp = 0.0;
        }
    }
}
