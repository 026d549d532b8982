use serde::{Deserialize, Serialize};

/// Multipliers that turn slider values into engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamScaling {
    pub male_pitch_scale: f32,
    pub female_pitch_scale: f32,
    /// Applied to the speed slider regardless of gender.
    pub rate_scale: f32,
    /// Pitch set directly on the engine when a male voice is selected.
    pub male_voice_pitch: f32,
    /// Pitch set directly on the engine when a female voice is selected.
    pub female_voice_pitch: f32,
}

impl Default for ParamScaling {
    fn default() -> Self {
        Self {
            male_pitch_scale: 0.8,
            female_pitch_scale: 1.0,
            rate_scale: 0.8,
            male_voice_pitch: 0.8,
            female_voice_pitch: 1.0,
        }
    }
}

impl ParamScaling {
    pub fn voice_pitch(&self, is_male: bool) -> f32 {
        if is_male {
            self.male_voice_pitch
        } else {
            self.female_voice_pitch
        }
    }
}

/// Pitch and rate handed to the engine right before an utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechParams {
    pub pitch: f32,
    pub rate: f32,
}

impl SpeechParams {
    /// Derive engine parameters from the user's pitch and speed sliders.
    pub fn derive(user_pitch: f32, user_speed: f32, is_male: bool, scaling: &ParamScaling) -> Self {
        let pitch_scale = if is_male {
            scaling.male_pitch_scale
        } else {
            scaling.female_pitch_scale
        };
        Self {
            pitch: user_pitch * pitch_scale,
            rate: user_speed * scaling.rate_scale,
        }
    }
}

/// Inclusive range accepted from the pitch and speed sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SliderRange {
    fn default() -> Self {
        Self { min: 0.5, max: 2.0 }
    }
}

impl SliderRange {
    /// Clamp `value` into the range. Returns `None` for NaN or infinities.
    ///
    /// Never panics: a NaN bound is ignored and an inverted range resolves to `max`.
    pub fn clamp(&self, value: f32) -> Option<f32> {
        value
            .is_finite()
            .then(|| value.max(self.min).min(self.max))
    }
}
