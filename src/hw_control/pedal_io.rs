//! Digital I/O seen by the poll loop: two switch levels in, one LED out
#[cfg(test)]
use mockall::automock;

use log::info;
use rppal::gpio::{Gpio, InputPin};
use serde::Serialize;

use super::status_light::StatusLight;
use crate::common::{config::PedalConfig, pedal_error::PedalError};

/// Levels sampled once per tick, true is pressed
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SwitchLevels {
    pub toggle: bool,
    pub cycle: bool,
}

#[cfg_attr(test, automock)]
pub trait PedalIo {
    fn read_switches(&mut self) -> SwitchLevels;
    fn set_led(&mut self, lit: bool);
}

/// Switches pulled down so an open switch reads LOW
pub struct GpioPedalIo {
    toggle: InputPin,
    cycle: InputPin,
    light: StatusLight,
}

impl GpioPedalIo {
    pub fn bind(config: &PedalConfig) -> Result<GpioPedalIo, PedalError> {
        let gpio = Gpio::new().map_err(|e| PedalError::device("gpio", e))?;
        let toggle = gpio
            .get(config.toggle_pin)
            .map_err(|e| PedalError::device("toggle switch", e))?
            .into_input_pulldown();
        let cycle = gpio
            .get(config.cycle_pin)
            .map_err(|e| PedalError::device("cycle switch", e))?
            .into_input_pulldown();
        let light = StatusLight::new(config.led_pin).map_err(|e| PedalError::device("status light", e))?;
        info!(
            "gpio bound: toggle {}, cycle {}, led {}",
            config.toggle_pin, config.cycle_pin, config.led_pin
        );
        Ok(GpioPedalIo { toggle, cycle, light })
    }
}

impl PedalIo for GpioPedalIo {
    fn read_switches(&mut self) -> SwitchLevels {
        SwitchLevels {
            toggle: self.toggle.is_high(),
            cycle: self.cycle.is_high(),
        }
    }
    fn set_led(&mut self, lit: bool) {
        self.light.set(lit);
    }
}
