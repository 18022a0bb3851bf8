use serde_json::{json, Value};

#[derive(ToPrimitive, FromPrimitive, Clone, Copy, Debug, PartialEq)]
pub enum SettingUnit {
    Linear = 0,
    Hertz,
    Seconds,
}

/// One named knob on an effect unit, with the range it accepts
#[derive(Clone, Debug, PartialEq)]
pub struct PedalSetting {
    name: String,
    value: f32,
    min: f32,
    max: f32,
    // true when min itself is not allowed (frequencies must be > 0)
    lower_open: bool,
    step: f32,
    units: SettingUnit,
}

impl PedalSetting {
    pub fn new(units: SettingUnit, name: &str, value: f32, min: f32, max: f32, step: f32) -> PedalSetting {
        PedalSetting {
            name: String::from(name),
            value,
            min,
            max,
            lower_open: false,
            step,
            units,
        }
    }
    /// Same range but the lower bound is excluded
    pub fn above(mut self) -> PedalSetting {
        self.lower_open = true;
        self
    }
    pub fn get_name(&self) -> &str {
        &self.name
    }
    pub fn get_value(&self) -> f32 {
        self.value
    }
    pub fn get_min(&self) -> f32 {
        self.min
    }
    pub fn get_max(&self) -> f32 {
        self.max
    }
    pub fn accepts(&self, value: f32) -> bool {
        let above_min = if self.lower_open {
            value > self.min
        } else {
            value >= self.min
        };
        value.is_finite() && above_min && value <= self.max
    }
    /// Store a value that has already passed `accepts`
    pub(crate) fn set_value(&mut self, value: f32) {
        self.value = value;
    }
    pub fn as_json(&self, idx: usize) -> Value {
        json!({
          "index": idx,
          "name": self.name,
          "value": self.value,
          "min": self.min,
          "max": self.max,
          "lower_open": self.lower_open,
          "step": self.step,
          "units": num::ToPrimitive::to_usize(&self.units),
        })
    }
}

/// Current value of a named setting, or `default` if the list has no such knob
pub fn setting_value(settings: &[PedalSetting], name: &str, default: f32) -> f32 {
    settings
        .iter()
        .find(|s| s.get_name() == name)
        .map(|s| s.get_value())
        .unwrap_or(default)
}

#[cfg(test)]
mod test_pedal_settings {
    use super::*;

    fn build_a_rate() -> PedalSetting {
        PedalSetting::new(SettingUnit::Hertz, "rate", 5.0, 0.0, 20.0, 0.1).above()
    }

    #[test]
    fn can_build() {
        let setting = build_a_rate();
        assert_eq!(setting.get_value(), 5.0);
        assert_eq!(setting.get_name(), "rate");
    }

    #[test]
    fn range_checks() {
        let rate = build_a_rate();
        assert!(!rate.accepts(0.0));
        assert!(rate.accepts(0.01));
        assert!(rate.accepts(20.0));
        assert!(!rate.accepts(20.01));
        assert!(!rate.accepts(f32::NAN));
        let depth = PedalSetting::new(SettingUnit::Linear, "depth", 1.0, 0.0, 1.0, 0.05);
        assert!(depth.accepts(0.0));
        assert!(!depth.accepts(1.5));
    }

    #[test]
    fn can_json_out() {
        let setting = build_a_rate();
        let j_val = setting.as_json(1);
        println!("jval: {}", j_val);
        assert_eq!(j_val["name"], "rate");
        assert_eq!(j_val["units"], 1);
        assert_eq!(j_val["lower_open"], true);
    }

    #[test]
    fn lookup_by_name() {
        let settings = vec![build_a_rate()];
        assert_eq!(setting_value(&settings, "rate", 1.0), 5.0);
        assert_eq!(setting_value(&settings, "depth", 1.0), 1.0);
    }
}
