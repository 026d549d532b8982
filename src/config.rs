use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::{ParamScaling, SliderRange};
use crate::voice::NameHintRules;

/// Tunables for [`PlaybackController`](crate::PlaybackController).
///
/// Every field has a default, so a JSON file only needs the values it
/// changes:
///
/// ```json
/// { "scaling": { "rate_scale": 1.0 }, "voice_rules": { "male_hints": ["iom"] } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Builder)]
#[builder(default, setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ControllerConfig {
    pub slider: SliderRange,
    pub scaling: ParamScaling,
    pub voice_rules: NameHintRules,
}

impl ControllerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let defaults = ControllerConfig::default();
        let config = ControllerConfig {
            slider: self.slider.unwrap_or(defaults.slider),
            scaling: self.scaling.unwrap_or(defaults.scaling),
            voice_rules: defaults.voice_rules,
        };
        config.check()
    }
}

impl ControllerConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        log::info!("Loading controller config from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    fn check(&self) -> Result<(), String> {
        let SliderRange { min, max } = self.slider;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(format!("slider range {min}..{max} must be positive and non-empty"));
        }

        let s = &self.scaling;
        let scales = [
            ("male_pitch_scale", s.male_pitch_scale),
            ("female_pitch_scale", s.female_pitch_scale),
            ("rate_scale", s.rate_scale),
            ("male_voice_pitch", s.male_voice_pitch),
            ("female_voice_pitch", s.female_voice_pitch),
        ];
        if let Some((name, value)) = scales
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(format!("{name} must be a positive number, got {value}"));
        }

        Ok(())
    }
}
