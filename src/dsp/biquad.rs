//! BiQuad filter
//!
//! Coefficients follow the usual audio eq cookbook forms.  `set_cutoff` lets a
//! modulated filter move without clearing its history, which would click.

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    AllPass,
    Notch,
}

pub struct BiQuadFilter {
    pub filter_type: FilterType,
    pub sample_rate: f64,
    pub cutoff_freq: f64,
    pub q: f64,
    // coeffs used to run the biquad
    a0: f64,
    a1: f64,
    a2: f64,
    b0: f64,
    b1: f64,
    b2: f64,
    // Values for previous inputs/outputs used to calculate current output
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiQuadFilter {
    pub fn new() -> BiQuadFilter {
        BiQuadFilter {
            filter_type: FilterType::LowPass,
            sample_rate: 48_000.0,
            cutoff_freq: 1.0,
            q: 1.0,
            a0: 1.0,
            a1: 0.0,
            a2: 0.0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }
    pub fn get_type(&self) -> FilterType {
        self.filter_type
    }
    pub fn init(&mut self, filter_type: FilterType, cutoff: f64, q: f64, sample_rate: f64) -> () {
        self.sample_rate = sample_rate;
        self.filter_type = filter_type;
        self.q = q;
        self.reset();
        self.set_cutoff(cutoff);
    }
    pub fn reset(&mut self) -> () {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
    /// Recalculate the coefficients for a new corner frequency, keeping state
    pub fn set_cutoff(&mut self, cutoff: f64) {
        // keep the corner below nyquist or the coefficients go unstable
        let nyquist = self.sample_rate / 2.0;
        self.cutoff_freq = cutoff.clamp(1.0, nyquist * 0.95);
        let omega = 2.0 * std::f64::consts::PI * (self.cutoff_freq / self.sample_rate);
        let cos_omega = f64::cos(omega);
        let alpha = f64::sin(omega) / (2.0 * self.q.max(0.01));
        match self.filter_type {
            FilterType::LowPass => {
                self.b0 = (1.0 - cos_omega) / 2.0;
                self.b1 = 1.0 - cos_omega;
                self.b2 = (1.0 - cos_omega) / 2.0;
            }
            FilterType::HighPass => {
                self.b0 = (1.0 + cos_omega) / 2.0;
                self.b1 = -1.0 * (1.0 + cos_omega);
                self.b2 = (1.0 + cos_omega) / 2.0;
            }
            FilterType::BandPass => {
                self.b0 = alpha;
                self.b1 = 0.0;
                self.b2 = -1.0 * alpha;
            }
            FilterType::AllPass => {
                self.b0 = 1.0 - alpha;
                self.b1 = -2.0 * cos_omega;
                self.b2 = 1.0 + alpha;
            }
            FilterType::Notch => {
                self.b0 = 1.0;
                self.b1 = -2.0 * cos_omega;
                self.b2 = 1.0;
            }
        }
        // the denominator is the same for every type here
        self.a0 = 1.0 + alpha;
        self.a1 = -2.0 * cos_omega;
        self.a2 = 1.0 - alpha;
        self.normalize_coeffs();
    }
    fn normalize_coeffs(&mut self) {
        self.b2 /= self.a0;
        self.b1 /= self.a0;
        self.b0 /= self.a0;
        self.a2 /= self.a0;
        self.a1 /= self.a0;
        self.a0 = 1.0;
    }

    pub fn get_sample(&mut self, input: f32) -> f32 {
        let value: f64 = self.b0 * input as f64 + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = input as f64;
        self.y2 = self.y1;
        self.y1 = value;
        value as f32
    }
}
