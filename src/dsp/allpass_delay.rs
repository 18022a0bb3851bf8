//! Schroeder allpass: a fixed delay with matched feedforward and feedback
//! paths, flat in level and smeared in time
use num::{Float, Zero};

pub struct AllpassDelay<T> {
    gain: T,
    line: Vec<T>,
    index: usize,
}

impl<T: Float> AllpassDelay<T> {
    pub fn new(length: usize, gain: T) -> AllpassDelay<T> {
        AllpassDelay {
            gain,
            line: vec![Zero::zero(); length.max(1)],
            index: 0,
        }
    }
    pub fn len(&self) -> usize {
        self.line.len()
    }
    pub fn get_sample(&mut self, input: T) -> T {
        let delayed = self.line[self.index];
        let fed = input + delayed * self.gain;
        self.line[self.index] = fed;
        self.index = (self.index + 1) % self.line.len();
        delayed - fed * self.gain
    }
}
