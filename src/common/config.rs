//! Settings for the pedal hardware read from an optional json file
//!
//! Nothing here is required.  If the file is missing or broken the defaults
//! are used, so a bare pedal comes up on the standard pins and ports.
use json::JsonValue;
use log::{info, warn};
use regex::Regex;
use simple_error::bail;
use std::{error::Error, fmt, io::ErrorKind, time::Duration};

use super::box_error::BoxError;

#[derive(Debug)]
pub struct MissingConfigError {
    key: String,
}

impl fmt::Display for MissingConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Required configuration value '{}' is missing", self.key)
    }
}

impl Error for MissingConfigError {}

pub struct Config {
    filename: String,
    settings: JsonValue,
    defaults: JsonValue,
}

impl Config {
    pub fn build(filename: String, defaults: JsonValue) -> Result<Config, std::io::Error> {
        // Only plain file names in the working directory, and they must be json
        let filename_regex = Regex::new(r"^[a-zA-Z0-9_\-\.]+\.json$")
            .map_err(|e| std::io::Error::new(ErrorKind::Other, e))?;
        if !filename_regex.is_match(&filename) {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("Invalid filename '{}' - must contain only letters, numbers, underscore, dash, dot and end in .json", filename),
            ));
        }

        let mut config = Config {
            filename,
            settings: json::object! {},
            defaults,
        };

        if let Err(err) = config.load_from_file() {
            warn!("Using default settings: {}", err);
        }

        Ok(config)
    }

    fn load_from_file(&mut self) -> std::io::Result<()> {
        let raw_data = std::fs::read_to_string(&self.filename)?;
        match json::parse(&raw_data) {
            Ok(parsed) => {
                self.settings = parsed;
                info!("Loaded settings from {}: {}", self.filename, self.settings.dump());
            }
            Err(err) => {
                warn!("Failed to parse config file {}: {}", self.filename, err);
            }
        }
        Ok(())
    }

    pub fn get_filename(&self) -> &str {
        &self.filename
    }

    pub fn get_str_value(&self, key: &str, default: Option<String>) -> Result<String, MissingConfigError> {
        if let Some(val) = self.settings[key].as_str() {
            return Ok(val.to_string());
        }
        if let Some(def) = default {
            return Ok(def);
        }
        if let Some(val) = self.defaults[key].as_str() {
            return Ok(val.to_string());
        }
        Err(MissingConfigError { key: key.to_string() })
    }

    pub fn get_u32_value(&self, key: &str, default: Option<u32>) -> Result<u32, MissingConfigError> {
        if let Some(val) = self.settings[key].as_u32() {
            return Ok(val);
        }
        if let Some(def) = default {
            return Ok(def);
        }
        if let Some(val) = self.defaults[key].as_u32() {
            return Ok(val);
        }
        Err(MissingConfigError { key: key.to_string() })
    }

    pub fn set_value(&mut self, key: &str, val: impl Into<JsonValue>) -> Result<(), String> {
        let json_val = val.into();
        match json_val {
            JsonValue::Short(_) | JsonValue::String(_) | JsonValue::Boolean(_) | JsonValue::Number(_) => {
                self.settings[key] = json_val;
                Ok(())
            }
            _ => Err(format!("Unsupported value type for key: {}", key)),
        }
    }
}

/// Default values for every key the pedal reads
pub fn pedal_defaults() -> JsonValue {
    json::object! {
        "toggle_pin": 17,
        "cycle_pin": 22,
        "led_pin": 27,
        "poll_interval_ms": 100,
        "client_name": "sfx_pedal",
        "capture_port": "system:capture_1",
        "playback_prefix": "system:playback_",
    }
}

/// Typed view of the settings used to bring up the pedal
#[derive(Debug, Clone, PartialEq)]
pub struct PedalConfig {
    pub toggle_pin: u8,
    pub cycle_pin: u8,
    pub led_pin: u8,
    pub poll_interval: Duration,
    pub client_name: String,
    pub capture_port: String,
    pub playback_prefix: String,
}

impl PedalConfig {
    pub fn from_config(config: &Config) -> Result<PedalConfig, BoxError> {
        let interval = config.get_u32_value("poll_interval_ms", None)?;
        if interval == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        Ok(PedalConfig {
            toggle_pin: Self::pin(config, "toggle_pin")?,
            cycle_pin: Self::pin(config, "cycle_pin")?,
            led_pin: Self::pin(config, "led_pin")?,
            poll_interval: Duration::from_millis(interval as u64),
            client_name: config.get_str_value("client_name", None)?,
            capture_port: config.get_str_value("capture_port", None)?,
            playback_prefix: config.get_str_value("playback_prefix", None)?,
        })
    }

    fn pin(config: &Config, key: &str) -> Result<u8, BoxError> {
        let pin = config.get_u32_value(key, None)?;
        if pin > 27 {
            bail!("{} = {} is not a BCM gpio pin", key, pin);
        }
        Ok(pin as u8)
    }
}

impl Default for PedalConfig {
    fn default() -> Self {
        PedalConfig {
            toggle_pin: 17,
            cycle_pin: 22,
            led_pin: 27,
            poll_interval: Duration::from_millis(100),
            client_name: String::from("sfx_pedal"),
            capture_port: String::from("system:capture_1"),
            playback_prefix: String::from("system:playback_"),
        }
    }
}
