use num::{Float, FromPrimitive, Zero};
use std::fmt::{self, Display};

use crate::utils::get_coef;

/// One pole lowpass, used for the envelope follower and the distortion tone
pub struct SmoothingFilter<T> {
    coef: T,
    last_output: T,
}

impl<T: Float + FromPrimitive> SmoothingFilter<T> {
    pub fn build(time_const: T, sample_rate: T) -> SmoothingFilter<T> {
        SmoothingFilter {
            coef: get_coef(time_const, sample_rate),
            last_output: Zero::zero(),
        }
    }

    /// Set the amount of the new sample let through directly (0..1)
    pub fn set_coef(&mut self, coef: T) {
        self.coef = coef.max(T::zero()).min(T::one());
    }

    pub fn get(&mut self, input: T) -> T {
        self.last_output = input * self.coef + (T::one() - self.coef) * self.last_output;
        self.last_output
    }
    pub fn get_last_output(&self) -> T {
        self.last_output
    }
}

impl<T: Float + FromPrimitive + Display> Display for SmoothingFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ coef: {}, last_output: {} }}",
            self.coef, self.last_output
        )
    }
}

#[cfg(test)]
mod test_smoothing_filter {
    use super::*;

    #[test]
    fn get_value() {
        let mut filter = SmoothingFilter::build(2.5, 2666.6);
        println!("init: {}", filter);
        // It should start at 0
        assert_eq!(filter.get(0.0), 0.0);
        for v in [0.2, 0.2, 0.4, 0.5, 0.6] {
            filter.get(v);
        }
        println!("post: {}", filter);
        assert!(filter.get(0.6) > 0.0);
        assert!(filter.get_last_output() < 0.6);
    }

    #[test]
    fn full_coef_passes_through() {
        let mut filter: SmoothingFilter<f32> = SmoothingFilter::build(0.01, 48_000.0);
        filter.set_coef(3.0);
        assert_eq!(filter.get(0.7), 0.7);
    }
}
