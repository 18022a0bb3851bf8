//! Error taxonomy for the pedal
//!
//! `Configuration` and `DeviceBinding` are fatal at startup.  `UnknownParameter`
//! and `Range` come from live parameter changes and are only reported; the unit
//! keeps its previous value.
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum PedalError {
    /// An initial unit setting could not be applied while building the bank
    Configuration {
        unit: String,
        reason: String,
    },
    UnknownParameter {
        unit: String,
        name: String,
    },
    Range {
        unit: String,
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },
    /// Audio or gpio hardware could not be opened
    DeviceBinding(String),
    NoSuchUnit(usize),
}

impl PedalError {
    pub fn device(what: &str, err: impl fmt::Display) -> PedalError {
        PedalError::DeviceBinding(format!("{}: {}", what, err))
    }

    /// Fatal errors stop the pedal before the poll loop ever runs
    pub fn is_fatal(&self) -> bool {
        match self {
            PedalError::Configuration { .. } | PedalError::DeviceBinding(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PedalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PedalError::Configuration { unit, reason } => {
                write!(f, "Configuration error in '{}': {}", unit, reason)
            }
            PedalError::UnknownParameter { unit, name } => {
                write!(f, "Unit '{}' has no parameter named '{}'", unit, name)
            }
            PedalError::Range {
                unit,
                name,
                value,
                min,
                max,
            } => write!(
                f,
                "Value {} for '{}' on '{}' is outside of [{}, {}]",
                value, name, unit, min, max
            ),
            PedalError::DeviceBinding(msg) => write!(f, "Device binding failed: {}", msg),
            PedalError::NoSuchUnit(idx) => write!(f, "No effect unit at index {}", idx),
        }
    }
}

impl Error for PedalError {}
