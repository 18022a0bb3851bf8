//! One audio effect unit: a composite effect behind a uniform lifecycle
//! and a name keyed parameter table
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{
    auto_wah::{self, AutoWah},
    chorus::{self, Chorus},
    clean::Clean,
    controls::PedalSetting,
    delay::{self, Delay},
    distortion::{self, Distortion},
    flanger::{self, Flanger},
    freq_shift::{self, FreqShift},
    pedal::Pedal,
    phaser::{self, Phaser},
    reverb::{self, Reverb},
    rotary::{self, Rotary},
    tremolo::{self, Tremolo},
    vibrato::{self, Vibrato},
};
use crate::{
    common::pedal_error::PedalError,
    signal::{
        block::{BlockId, SignalSource},
        server::BlockServer,
    },
};

/// Crossfade used when a unit changes input (seconds)
pub const DEFAULT_FADE_TIME: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    /// built, not computing
    Idle,
    /// computing, not heard
    Rendering,
    /// computing and on the outputs
    Routed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Clean,
    Chorus,
    Reverb,
    Flanger,
    Vibrato,
    Tremolo,
    Rotary,
    Delay,
    Phaser,
    Distortion,
    AutoWah,
    FreqShift,
}

impl EffectKind {
    /// Knobs this kind of unit has, at their default values
    pub fn settings(&self) -> Vec<PedalSetting> {
        match self {
            EffectKind::Clean => vec![],
            EffectKind::Chorus => chorus::settings(),
            EffectKind::Reverb => reverb::settings(),
            EffectKind::Flanger => flanger::settings(),
            EffectKind::Vibrato => vibrato::settings(),
            EffectKind::Tremolo => tremolo::settings(),
            EffectKind::Rotary => rotary::settings(),
            EffectKind::Delay => delay::settings(),
            EffectKind::Phaser => phaser::settings(),
            EffectKind::Distortion => distortion::settings(),
            EffectKind::AutoWah => auto_wah::settings(),
            EffectKind::FreqShift => freq_shift::settings(),
        }
    }
    pub fn output_channels(&self) -> usize {
        match self {
            EffectKind::Rotary => 3,
            _ => 1,
        }
    }
    pub fn default_name(&self) -> &'static str {
        match self {
            EffectKind::Clean => "Clean",
            EffectKind::Chorus => "Chorus",
            EffectKind::Reverb => "Reverb",
            EffectKind::Flanger => "Flanger",
            EffectKind::Vibrato => "Vibrato",
            EffectKind::Tremolo => "Tremolo",
            EffectKind::Rotary => "Leslie Speaker",
            EffectKind::Delay => "Delay",
            EffectKind::Phaser => "Phaser",
            EffectKind::Distortion => "Distortion",
            EffectKind::AutoWah => "Envelope Filter",
            EffectKind::FreqShift => "FreqShift",
        }
    }

    /// Default settings with `overrides` applied, or the first override that
    /// names no knob or is out of range
    pub fn checked_settings(&self, unit: &str, overrides: &[(String, f32)]) -> Result<Vec<PedalSetting>, PedalError> {
        let mut settings = self.settings();
        for (name, value) in overrides {
            let setting = match settings.iter_mut().find(|s| s.get_name() == name.as_str()) {
                Some(s) => s,
                None => {
                    return Err(PedalError::Configuration {
                        unit: unit.to_string(),
                        reason: format!("no parameter named '{}'", name),
                    })
                }
            };
            if !setting.accepts(*value) {
                return Err(PedalError::Configuration {
                    unit: unit.to_string(),
                    reason: format!(
                        "{} = {} is outside of [{}, {}]",
                        name,
                        value,
                        setting.get_min(),
                        setting.get_max()
                    ),
                });
            }
            setting.set_value(*value);
        }
        Ok(settings)
    }
}

enum Effect {
    Clean(Clean),
    Chorus(Chorus),
    Reverb(Reverb),
    Flanger(Flanger),
    Vibrato(Vibrato),
    Tremolo(Tremolo),
    Rotary(Rotary),
    Delay(Delay),
    Phaser(Phaser),
    Distortion(Distortion),
    AutoWah(AutoWah),
    FreqShift(FreqShift),
}

impl Effect {
    fn build(kind: EffectKind, server: &BlockServer, input: SignalSource, settings: &[PedalSetting]) -> Effect {
        match kind {
            EffectKind::Clean => Effect::Clean(Clean::new(server, input)),
            EffectKind::Chorus => Effect::Chorus(Chorus::from_settings(server, input, settings)),
            EffectKind::Reverb => Effect::Reverb(Reverb::from_settings(server, input, settings)),
            EffectKind::Flanger => Effect::Flanger(Flanger::from_settings(server, input, settings)),
            EffectKind::Vibrato => Effect::Vibrato(Vibrato::from_settings(server, input, settings)),
            EffectKind::Tremolo => Effect::Tremolo(Tremolo::from_settings(server, input, settings)),
            EffectKind::Rotary => Effect::Rotary(Rotary::from_settings(server, input, settings)),
            EffectKind::Delay => Effect::Delay(Delay::from_settings(server, input, settings)),
            EffectKind::Phaser => Effect::Phaser(Phaser::from_settings(server, input, settings)),
            EffectKind::Distortion => Effect::Distortion(Distortion::from_settings(server, input, settings)),
            EffectKind::AutoWah => Effect::AutoWah(AutoWah::from_settings(server, input, settings)),
            EffectKind::FreqShift => Effect::FreqShift(FreqShift::from_settings(server, input, settings)),
        }
    }
    fn pedal(&self) -> &dyn Pedal {
        match self {
            Effect::Clean(p) => p,
            Effect::Chorus(p) => p,
            Effect::Reverb(p) => p,
            Effect::Flanger(p) => p,
            Effect::Vibrato(p) => p,
            Effect::Tremolo(p) => p,
            Effect::Rotary(p) => p,
            Effect::Delay(p) => p,
            Effect::Phaser(p) => p,
            Effect::Distortion(p) => p,
            Effect::AutoWah(p) => p,
            Effect::FreqShift(p) => p,
        }
    }
    fn pedal_mut(&mut self) -> &mut dyn Pedal {
        match self {
            Effect::Clean(p) => p,
            Effect::Chorus(p) => p,
            Effect::Reverb(p) => p,
            Effect::Flanger(p) => p,
            Effect::Vibrato(p) => p,
            Effect::Tremolo(p) => p,
            Effect::Rotary(p) => p,
            Effect::Delay(p) => p,
            Effect::Phaser(p) => p,
            Effect::Distortion(p) => p,
            Effect::AutoWah(p) => p,
            Effect::FreqShift(p) => p,
        }
    }
}

pub struct EffectUnit {
    name: String,
    index: usize,
    kind: EffectKind,
    state: UnitState,
    settings: Vec<PedalSetting>,
    effect: Effect,
}

impl EffectUnit {
    /// Build the unit's blocks reading from `input`.  Every override is checked
    /// before anything is created, so a bad one leaves the server untouched.
    pub fn configure(
        kind: EffectKind,
        name: &str,
        index: usize,
        server: &BlockServer,
        input: SignalSource,
        overrides: &[(String, f32)],
    ) -> Result<EffectUnit, PedalError> {
        let settings = kind.checked_settings(name, overrides)?;
        let effect = Effect::build(kind, server, input, &settings);
        debug!("configured {} as {:?} at {}", name, kind, index);
        Ok(EffectUnit {
            name: name.to_string(),
            index,
            kind,
            state: UnitState::Idle,
            settings,
            effect,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn kind(&self) -> EffectKind {
        self.kind
    }
    pub fn state(&self) -> UnitState {
        self.state
    }
    pub fn output_block_id(&self) -> BlockId {
        self.effect.pedal().output()
    }
    pub fn output_channels(&self) -> usize {
        self.effect.pedal().output_channels()
    }

    pub fn get_parameter(&self, name: &str) -> Result<f32, PedalError> {
        self.settings
            .iter()
            .find(|s| s.get_name() == name)
            .map(|s| s.get_value())
            .ok_or_else(|| PedalError::UnknownParameter {
                unit: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Check then store the value and write it to the blocks that use it.
    /// A rejected value leaves the old one in place.
    pub fn set_parameter(&mut self, name: &str, value: f32) -> Result<(), PedalError> {
        let setting = match self.settings.iter_mut().find(|s| s.get_name() == name) {
            Some(s) => s,
            None => {
                return Err(PedalError::UnknownParameter {
                    unit: self.name.clone(),
                    name: name.to_string(),
                })
            }
        };
        if !setting.accepts(value) {
            return Err(PedalError::Range {
                unit: self.name.clone(),
                name: name.to_string(),
                value,
                min: setting.get_min(),
                max: setting.get_max(),
            });
        }
        setting.set_value(value);
        self.effect.pedal_mut().apply(name, value);
        info!("{}: {} = {}", self.name, name, value);
        Ok(())
    }

    pub fn set_input(&mut self, source: SignalSource, fadetime: f32) {
        self.effect.pedal_mut().set_input(source, fadetime);
    }

    pub fn start(&mut self) {
        if self.state == UnitState::Idle {
            self.effect.pedal_mut().play();
            self.state = UnitState::Rendering;
        }
    }

    pub fn route_to_output(&mut self) {
        if self.state != UnitState::Routed {
            self.effect.pedal_mut().out(0);
            self.state = UnitState::Routed;
        }
    }

    pub fn stop(&mut self) {
        if self.state != UnitState::Idle {
            self.effect.pedal_mut().stop();
            self.state = UnitState::Idle;
        }
    }

    pub fn settings_json(&self) -> serde_json::Value {
        let settings: Vec<serde_json::Value> = self
            .settings
            .iter()
            .enumerate()
            .map(|(i, s)| s.as_json(i))
            .collect();
        json!({
            "index": self.index,
            "name": self.name,
            "kind": self.kind,
            "state": self.state,
            "settings": settings,
        })
    }
}
