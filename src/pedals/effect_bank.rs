//! The fixed bank of effect units the pedal cycles through, plus the clean
//! passthrough used for bypass
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::effect_unit::{EffectKind, EffectUnit, UnitState};
use crate::{common::pedal_error::PedalError, signal::{block::SignalSource, server::BlockServer}};

/// How to build one unit: its kind, display name and knob overrides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub kind: EffectKind,
    pub name: String,
    pub params: Vec<(String, f32)>,
}

impl UnitConfig {
    pub fn new(kind: EffectKind) -> UnitConfig {
        UnitConfig {
            kind,
            name: kind.default_name().to_string(),
            params: vec![],
        }
    }
    pub fn with_param(mut self, name: &str, value: f32) -> UnitConfig {
        self.params.push((name.to_string(), value));
        self
    }
}

/// The bank the pedal ships with, in footswitch order
pub fn default_bank() -> Vec<UnitConfig> {
    vec![
        UnitConfig::new(EffectKind::Chorus),
        UnitConfig::new(EffectKind::Distortion),
        UnitConfig::new(EffectKind::Reverb),
        UnitConfig::new(EffectKind::Delay),
        UnitConfig::new(EffectKind::Flanger)
            .with_param("depth", 0.875)
            .with_param("lfofreq", 0.545),
        UnitConfig::new(EffectKind::AutoWah),
        UnitConfig::new(EffectKind::Tremolo),
        UnitConfig::new(EffectKind::Vibrato),
        UnitConfig::new(EffectKind::Phaser),
        UnitConfig::new(EffectKind::Rotary),
        UnitConfig::new(EffectKind::FreqShift),
    ]
}

pub fn default_passthrough() -> UnitConfig {
    UnitConfig::new(EffectKind::Clean)
}

pub struct EffectBank {
    units: Vec<EffectUnit>,
    passthrough: EffectUnit,
    index: usize,
}

impl EffectBank {
    /// Build every unit reading from `input`.  All configurations are checked
    /// first so a bad one means no unit gets built at all.
    pub fn build(
        server: &BlockServer,
        input: SignalSource,
        configs: &[UnitConfig],
        passthrough: &UnitConfig,
    ) -> Result<EffectBank, PedalError> {
        if configs.is_empty() {
            return Err(PedalError::Configuration {
                unit: String::from("bank"),
                reason: String::from("no effect units configured"),
            });
        }
        for cfg in configs.iter().chain(std::iter::once(passthrough)) {
            cfg.kind.checked_settings(&cfg.name, &cfg.params)?;
        }
        let mut units = Vec::with_capacity(configs.len());
        for (idx, cfg) in configs.iter().enumerate() {
            units.push(EffectUnit::configure(cfg.kind, &cfg.name, idx, server, input, &cfg.params)?);
        }
        let passthrough = EffectUnit::configure(
            passthrough.kind,
            &passthrough.name,
            configs.len(),
            server,
            input,
            &passthrough.params,
        )?;
        info!("effect bank built with {} units", units.len());
        Ok(EffectBank {
            units,
            passthrough,
            index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn unit(&self, index: usize) -> Option<&EffectUnit> {
        self.units.get(index)
    }
    pub fn passthrough(&self) -> &EffectUnit {
        &self.passthrough
    }
    /// Unit at the selected index
    pub fn selected(&self) -> &EffectUnit {
        &self.units[self.index]
    }

    /// Make the unit at `index` the only one on the outputs.  Everything else
    /// is stopped first; the caller's flush delivers the lot as one batch.
    pub fn activate(&mut self, index: usize) -> Result<(), PedalError> {
        if index >= self.units.len() {
            return Err(PedalError::NoSuchUnit(index));
        }
        self.passthrough.stop();
        for (i, unit) in self.units.iter_mut().enumerate() {
            if i != index {
                unit.stop();
            }
        }
        self.units[index].route_to_output();
        info!("activated {} ({})", self.units[index].name(), index);
        Ok(())
    }

    pub fn activate_passthrough(&mut self) {
        for unit in self.units.iter_mut() {
            unit.stop();
        }
        self.passthrough.route_to_output();
        info!("activated {}", self.passthrough.name());
    }

    /// Step the selection, wrapping at the end of the bank
    pub fn advance_index(&mut self) -> usize {
        self.index = (self.index + 1) % self.units.len();
        self.index
    }

    pub fn set_parameter(&mut self, index: usize, name: &str, value: f32) -> Result<(), PedalError> {
        match self.units.get_mut(index) {
            Some(unit) => unit.set_parameter(name, value),
            None => Err(PedalError::NoSuchUnit(index)),
        }
    }

    /// Units (passthrough included) currently on the outputs
    pub fn routed_count(&self) -> usize {
        self.units
            .iter()
            .chain(std::iter::once(&self.passthrough))
            .filter(|u| u.state() == UnitState::Routed)
            .count()
    }

    /// Device outputs needed by the hungriest unit
    pub fn output_channels(&self) -> usize {
        self.units
            .iter()
            .map(|u| u.output_channels())
            .chain(std::iter::once(self.passthrough.output_channels()))
            .max()
            .unwrap_or(1)
    }

    pub fn as_json(&self) -> serde_json::Value {
        let units: Vec<serde_json::Value> = self.units.iter().map(|u| u.settings_json()).collect();
        json!({
            "index": self.index,
            "passthrough": self.passthrough.name(),
            "units": units,
        })
    }
}
