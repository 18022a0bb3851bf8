//! Two switch pedal state machine
//!
//! The toggle switch flips between the clean passthrough and the selected
//! effect.  The cycle switch steps the selection and, while an effect is on,
//! brings the new one in straight away.  Both switches also flip the LED.
//! When both fire in one tick the toggle goes first.
use log::{error, info};
use serde::Serialize;

use crate::{
    hw_control::{footswitch::EdgeTracker, pedal_io::SwitchLevels},
    pedals::effect_bank::EffectBank,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PedalMode {
    Bypass,
    EffectSelected,
}

#[derive(Debug, Serialize)]
pub struct PedalStatus<'a> {
    pub mode: PedalMode,
    pub index: usize,
    pub effect: &'a str,
    pub led: bool,
}

pub struct PedalController {
    mode: PedalMode,
    led_lit: bool,
    toggle: EdgeTracker,
    cycle: EdgeTracker,
}

impl PedalController {
    pub fn new() -> PedalController {
        PedalController {
            mode: PedalMode::Bypass,
            led_lit: false,
            toggle: EdgeTracker::new(),
            cycle: EdgeTracker::new(),
        }
    }
    pub fn mode(&self) -> PedalMode {
        self.mode
    }
    pub fn bypass_engaged(&self) -> bool {
        self.mode == PedalMode::Bypass
    }
    pub fn led_lit(&self) -> bool {
        self.led_lit
    }

    pub fn status<'a>(&self, bank: &'a EffectBank) -> PedalStatus<'a> {
        PedalStatus {
            mode: self.mode,
            index: bank.index(),
            effect: bank.selected().name(),
            led: self.led_lit,
        }
    }

    /// Feed one tick of switch levels.  Returns true if anything changed.
    pub fn tick(&mut self, bank: &mut EffectBank, levels: SwitchLevels) -> bool {
        let toggled = self.toggle.update(levels.toggle);
        let cycled = self.cycle.update(levels.cycle);
        if toggled {
            self.on_toggle(bank);
        }
        if cycled {
            self.on_cycle(bank);
        }
        toggled || cycled
    }

    fn on_toggle(&mut self, bank: &mut EffectBank) {
        self.led_lit = !self.led_lit;
        match self.mode {
            PedalMode::Bypass => {
                info!("Toggle On");
                self.mode = PedalMode::EffectSelected;
                self.activate_selected(bank);
            }
            PedalMode::EffectSelected => {
                info!("Toggle Off");
                self.mode = PedalMode::Bypass;
                bank.activate_passthrough();
            }
        }
        self.log_status(bank);
    }

    fn on_cycle(&mut self, bank: &mut EffectBank) {
        info!("Changing Effect");
        self.led_lit = !self.led_lit;
        bank.advance_index();
        info!("Current effect: {}", bank.selected().name());
        if self.mode == PedalMode::EffectSelected {
            self.activate_selected(bank);
        }
        self.log_status(bank);
    }

    fn activate_selected(&self, bank: &mut EffectBank) {
        // on failure nothing was stopped, so whatever was playing still is
        if let Err(e) = bank.activate(bank.index()) {
            error!("could not activate effect: {}", e);
        }
    }

    fn log_status(&self, bank: &EffectBank) {
        match serde_json::to_string(&self.status(bank)) {
            Ok(status) => info!("pedal: {}", status),
            Err(e) => error!("pedal status: {}", e),
        }
    }
}

impl Default for PedalController {
    fn default() -> Self {
        PedalController::new()
    }
}
