//! Voice inventory types and gender-based voice selection.
//!
//! Engines name their voices after vendor-specific conventions, so choosing
//! a "male" or "female" voice is a best-effort guess from name fragments.
//! The guessing lives behind [`VoiceMatcher`] so a host can swap it per
//! platform without touching the playback state machine.

use std::collections::BTreeSet;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::language::LanguageId;

/// Engine quality tier of a voice. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceQuality(pub u32);

impl VoiceQuality {
    pub const VERY_LOW: Self = Self(100);
    pub const LOW: Self = Self(200);
    pub const NORMAL: Self = Self(300);
    pub const HIGH: Self = Self(400);
    pub const VERY_HIGH: Self = Self(500);
}

impl Default for VoiceQuality {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A voice as reported by the speech engine.
///
/// ```
/// use type2speak::language::LanguageId;
/// use type2speak::voice::{VoiceDescriptorBuilder, VoiceQuality};
///
/// let voice = VoiceDescriptorBuilder::default()
///     .name("en-gb-x-gba-local")
///     .locale(LanguageId::new("en", "GB"))
///     .quality(VoiceQuality::HIGH)
///     .build()?;
/// assert!(!voice.network_required);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct VoiceDescriptor {
    pub name: String,
    pub locale: LanguageId,
    #[builder(default)]
    #[serde(default)]
    pub quality: VoiceQuality,
    /// True if synthesis with this voice needs a network connection.
    #[builder(default)]
    #[serde(default)]
    pub network_required: bool,
    /// Engine feature tags.
    #[builder(default)]
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl VoiceDescriptor {
    /// Shorthand for an offline voice of normal quality with no feature tags.
    pub fn new(name: impl Into<String>, locale: LanguageId) -> Self {
        Self {
            name: name.into(),
            locale,
            quality: VoiceQuality::default(),
            network_required: false,
            features: BTreeSet::new(),
        }
    }

    /// Case-insensitive substring test against the voice name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(needle.to_lowercase().as_str())
    }

    pub fn is_offline(&self) -> bool {
        !self.network_required
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceGender {
    Male,
    Female,
}

impl VoiceGender {
    pub fn from_is_male(is_male: bool) -> Self {
        if is_male {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn is_male(self) -> bool {
        self == Self::Male
    }
}

/// Strategy for picking voices out of an engine's inventory.
pub trait VoiceMatcher {
    /// Pick a voice for `gender`, or `None` to leave the engine's current voice alone.
    fn select<'a>(
        &self,
        voices: &'a [VoiceDescriptor],
        gender: VoiceGender,
    ) -> Option<&'a VoiceDescriptor>;

    /// Pick a voice to activate once the engine has started.
    ///
    /// Default implementation keeps the engine's own default voice.
    fn startup_voice<'a>(&self, _voices: &'a [VoiceDescriptor]) -> Option<&'a VoiceDescriptor> {
        None
    }
}

/// Name fragments and thresholds used by [`NameHintMatcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameHintRules {
    /// Only voices in this language are considered for gender selection.
    pub base_language: String,
    pub male_hints: Vec<String>,
    pub female_hints: Vec<String>,
    /// Exact locale required of the startup voice.
    pub startup_locale: LanguageId,
    pub startup_min_quality: VoiceQuality,
    /// Name fragment required of the startup voice.
    pub startup_marker: String,
}

impl Default for NameHintRules {
    fn default() -> Self {
        Self {
            base_language: "en".to_string(),
            male_hints: ["gb", "au", "iob", "tpf"].map(String::from).to_vec(),
            female_hints: ["sfg", "ene", "enc"].map(String::from).to_vec(),
            startup_locale: LanguageId::english_us(),
            startup_min_quality: VoiceQuality::NORMAL,
            startup_marker: "enhanced".to_string(),
        }
    }
}

/// Selects voices by case-insensitive name fragments.
///
/// For either gender the first offline voice in the base language whose
/// name contains one of that gender's hints wins; failing that, the first
/// offline voice in the base language.
#[derive(Debug, Clone, Default)]
pub struct NameHintMatcher {
    rules: NameHintRules,
}

impl NameHintMatcher {
    pub fn new(rules: NameHintRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &NameHintRules {
        &self.rules
    }

    fn is_candidate(&self, voice: &VoiceDescriptor) -> bool {
        voice
            .locale
            .language()
            .eq_ignore_ascii_case(&self.rules.base_language)
            && voice.is_offline()
    }

    fn hints(&self, gender: VoiceGender) -> &[String] {
        match gender {
            VoiceGender::Male => &self.rules.male_hints,
            VoiceGender::Female => &self.rules.female_hints,
        }
    }
}

impl VoiceMatcher for NameHintMatcher {
    fn select<'a>(
        &self,
        voices: &'a [VoiceDescriptor],
        gender: VoiceGender,
    ) -> Option<&'a VoiceDescriptor> {
        let hints = self.hints(gender);
        voices
            .iter()
            .find(|v| self.is_candidate(v) && hints.iter().any(|h| v.name_contains(h)))
            .or_else(|| voices.iter().find(|v| self.is_candidate(v)))
    }

    fn startup_voice<'a>(&self, voices: &'a [VoiceDescriptor]) -> Option<&'a VoiceDescriptor> {
        voices.iter().find(|v| {
            v.locale == self.rules.startup_locale
                && v.quality >= self.rules.startup_min_quality
                && v.is_offline()
                && v.name_contains(&self.rules.startup_marker)
        })
    }
}
