use num::{Float, FromPrimitive};

// utility functions

/// One pole coefficient for a time constant (seconds) at a sample rate
pub fn get_coef<T: Float + FromPrimitive>(time_const: T, sample_rate: T) -> T {
    let one = T::one();
    if time_const <= T::zero() || sample_rate <= T::zero() {
        return one;
    }
    one - (-one / (time_const * sample_rate)).exp()
}

/// Time constant (seconds) of a one pole filter with the given corner frequency
pub fn freq_to_time_const<T: Float + FromPrimitive>(freq: T) -> T {
    let two_pi = T::from_f64(std::f64::consts::PI * 2.0).unwrap_or(T::one());
    T::one() / (two_pi * freq)
}
