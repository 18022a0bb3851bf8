use log::debug;
use rppal::gpio::{Gpio, OutputPin};

use crate::common::box_error::BoxError;

/// Single colour LED on one gpio output
pub struct StatusLight {
    pin: OutputPin,
    lit: bool,
}

impl StatusLight {
    pub fn new(pin: u8) -> Result<StatusLight, BoxError> {
        let mut light = StatusLight {
            pin: Gpio::new()?.get(pin)?.into_output(),
            lit: false,
        };
        light.set(false);
        debug!("status light on gpio {}", pin);
        Ok(light)
    }
    pub fn set(&mut self, lit: bool) -> () {
        if lit {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        self.lit = lit;
    }
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod test_lights {
    use super::*;

    #[test]
    fn toggle() {
        // only does anything on a pi
        match StatusLight::new(27) {
            Ok(mut light) => {
                light.set(true);
                assert!(light.is_lit());
                light.set(false);
            }
            Err(e) => {
                dbg!(e);
            }
        }
    }
}
