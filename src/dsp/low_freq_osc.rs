use num::{Float, FromPrimitive, Zero};

pub enum WaveShape {
    Sine,
    Square,
    Ramp,
}

/// Phase accumulating oscillator used for every modulation source on the pedal
pub struct LowFreqOsc<T> {
    shape: WaveShape,
    amp: T,
    freq: T,
    sample_rate: T,
    phase_inc: T,
    phase: T,
    pi: T,
    two_pi: T,
}

impl<T: Float + FromPrimitive> LowFreqOsc<T> {
    pub fn new() -> LowFreqOsc<T> {
        LowFreqOsc {
            shape: WaveShape::Sine,
            amp: T::one(),
            freq: T::one(),
            sample_rate: T::from_f64(48_000.0).unwrap_or(T::one()),
            phase_inc: T::from_f64(0.01).unwrap_or(T::zero()),
            phase: Zero::zero(),
            pi: T::from_f64(std::f64::consts::PI).unwrap_or(T::zero()),
            two_pi: T::from_f64(std::f64::consts::PI * 2.0).unwrap_or(T::zero()),
        }
    }
    pub fn init(&mut self, shape: WaveShape, freq: T, amp: T, sample_rate: T) -> () {
        self.shape = shape;
        self.sample_rate = sample_rate;
        self.amp = amp;
        self.phase = Zero::zero();
        self.set_freq(freq);
    }
    /// Start point as a fraction of a cycle (0.5 is half a cycle out)
    pub fn set_phase(&mut self, fraction: T) {
        let wrapped = fraction - fraction.floor();
        self.phase = wrapped * self.two_pi;
    }
    /// Change the rate without jumping the phase
    pub fn set_freq(&mut self, freq: T) {
        self.freq = freq;
        self.phase_inc = self.two_pi * freq / self.sample_rate;
    }
    pub fn get_freq(&self) -> T {
        self.freq
    }
    pub fn set_amp(&mut self, amp: T) {
        self.amp = amp;
    }
    pub fn get_sample(&mut self) -> T {
        let val = match self.shape {
            WaveShape::Sine => self.amp * T::sin(self.phase),
            WaveShape::Square => {
                if self.phase < self.pi {
                    self.amp
                } else {
                    -self.amp
                }
            }
            WaveShape::Ramp => self.amp * self.phase / self.two_pi,
        };
        self.phase = self.phase + self.phase_inc;
        while self.phase >= self.two_pi {
            self.phase = self.phase - self.two_pi;
        }
        val
    }
}

#[cfg(test)]
pub mod test_low_freq_osc {
    use super::*;

    #[test]
    fn can_make_waves() {
        let mut osc: LowFreqOsc<f32> = LowFreqOsc::new();
        osc.init(WaveShape::Sine, 1000.0, 1.0, 4000.0);
        let output: Vec<f32> = (0..4).map(|_| osc.get_sample()).collect();
        println!("sine: {:?}", output);
        assert!(output[0].abs() < 1e-6);
        assert!((output[1] - 1.0).abs() < 1e-5);
        assert!(output[3] < -0.99);
        osc.init(WaveShape::Square, 1000.0, 1.0, 4000.0);
        let output: Vec<f32> = (0..4).map(|_| osc.get_sample()).collect();
        println!("square: {:?}", output);
        assert_eq!(output[0], 1.0);
    }

    #[test]
    fn half_cycle_offset() {
        let mut a: LowFreqOsc<f64> = LowFreqOsc::new();
        let mut b: LowFreqOsc<f64> = LowFreqOsc::new();
        a.init(WaveShape::Sine, 2.0, 1.0, 100.0);
        b.init(WaveShape::Sine, 2.0, 1.0, 100.0);
        b.set_phase(0.5);
        for _ in 0..50 {
            let sum = a.get_sample() + b.get_sample();
            assert!(sum.abs() < 1e-9);
        }
    }

    #[test]
    fn rate_change_keeps_phase() {
        let mut osc: LowFreqOsc<f64> = LowFreqOsc::new();
        osc.init(WaveShape::Ramp, 1.0, 1.0, 8.0);
        osc.get_sample();
        osc.get_sample();
        osc.set_freq(2.0);
        // phase sits at a quarter cycle and now advances a quarter per sample
        assert!((osc.get_sample() - 0.25).abs() < 1e-9);
        assert!((osc.get_sample() - 0.5).abs() < 1e-9);
        assert_eq!(osc.get_freq(), 2.0);
    }
}
