//! Spoken-language identifiers and script-based language detection.
//!
//! # Detection rules
//!
//! Text is classified by testing, in a fixed priority order, whether *any*
//! character falls inside a reserved Unicode block. The first rule that
//! matches wins; there is no scoring and no blending of scripts.
//!
//! | Priority | Block | Range | Language |
//! |---|---|---|---|
//! | 1 | Devanagari | `U+0900..=U+097F` | `hi-IN` |
//! | 2 | Hiragana | `U+3040..=U+309F` | `ja-JP` |
//! | 3 | Hebrew | `U+0590..=U+05FF` | `he-IL` |
//! | 4 | Arabic | `U+0600..=U+06FF` | `ar-SA` |
//! | – | anything else | | `en-US` |
//!
//! ```
//! use type2speak::language::{detect_language, LanguageId};
//!
//! assert_eq!(detect_language("नमस्ते"), LanguageId::new("hi", "IN"));
//! assert_eq!(detect_language("hello"), LanguageId::english_us());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LanguageIdError;

/// A language code plus an optional region code, e.g. `en-US` or `hi`.
///
/// Language codes are stored lower-case and region codes upper-case, so two
/// identifiers compare equal whenever they name the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageId {
    language: String,
    region: Option<String>,
}

impl LanguageId {
    /// Create an identifier from a language and region code.
    ///
    /// Codes are normalised but not validated; use [`str::parse`] for
    /// untrusted input.
    pub fn new(language: &str, region: &str) -> Self {
        let region = region.trim();
        Self {
            language: language.trim().to_ascii_lowercase(),
            region: (!region.is_empty()).then(|| region.to_ascii_uppercase()),
        }
    }

    /// Create an identifier with no region.
    pub fn language_only(language: &str) -> Self {
        Self::new(language, "")
    }

    pub fn english_us() -> Self {
        Self::new("en", "US")
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// True if both identifiers share the same language code, ignoring region.
    pub fn same_language(&self, other: &LanguageId) -> bool {
        self.language == other.language
    }

    /// English name of the language, for log output.
    pub fn display_language(&self) -> &'static str {
        match self.language.as_str() {
            "en" => "English",
            "hi" => "Hindi",
            "ja" => "Japanese",
            "he" | "iw" => "Hebrew",
            "ar" => "Arabic",
            "es" => "Spanish",
            "fr" => "French",
            "de" => "German",
            "pt" => "Portuguese",
            "ru" => "Russian",
            "zh" => "Chinese",
            "it" => "Italian",
            _ => "Unknown",
        }
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::english_us()
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for LanguageId {
    type Err = LanguageIdError;

    /// Parse `ll`, `ll-RR` or `ll_RR` (also `ll-NNN` for numeric regions).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LanguageIdError::Empty);
        }

        let mut parts = s.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LanguageIdError::InvalidLanguage(language.to_string()));
        }

        let region = parts.next().unwrap_or_default();
        let region_ok = region.is_empty()
            || (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()))
            || (region.len() == 3 && region.chars().all(|c| c.is_ascii_digit()));
        if !region_ok {
            return Err(LanguageIdError::InvalidRegion(region.to_string()));
        }

        if parts.next().is_some() {
            return Err(LanguageIdError::TrailingSubtag(s.to_string()));
        }

        Ok(Self::new(language, region))
    }
}

impl TryFrom<String> for LanguageId {
    type Error = LanguageIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageId> for String {
    fn from(value: LanguageId) -> Self {
        value.to_string()
    }
}

/// One entry of the script classification table.
#[derive(Debug, Clone, Copy)]
pub struct ScriptRule {
    /// Unicode block name.
    pub script: &'static str,
    pub first: char,
    pub last: char,
    pub language: &'static str,
    pub region: &'static str,
}

impl ScriptRule {
    pub fn contains(&self, ch: char) -> bool {
        (self.first..=self.last).contains(&ch)
    }

    pub fn language_id(&self) -> LanguageId {
        LanguageId::new(self.language, self.region)
    }
}

/// Classification rules in priority order.
pub const SCRIPT_RULES: &[ScriptRule] = &[
    ScriptRule {
        script: "Devanagari",
        first: '\u{0900}',
        last: '\u{097F}',
        language: "hi",
        region: "IN",
    },
    ScriptRule {
        script: "Hiragana",
        first: '\u{3040}',
        last: '\u{309F}',
        language: "ja",
        region: "JP",
    },
    ScriptRule {
        script: "Hebrew",
        first: '\u{0590}',
        last: '\u{05FF}',
        language: "he",
        region: "IL",
    },
    ScriptRule {
        script: "Arabic",
        first: '\u{0600}',
        last: '\u{06FF}',
        language: "ar",
        region: "SA",
    },
];

/// Guess the spoken language of `text` from its script.
///
/// Returns `en-US` when no rule matches, including for empty text.
pub fn detect_language(text: &str) -> LanguageId {
    SCRIPT_RULES
        .iter()
        .find(|rule| text.chars().any(|ch| rule.contains(ch)))
        .map(ScriptRule::language_id)
        .unwrap_or_else(LanguageId::english_us)
}

/// A language offered for manual selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub id: LanguageId,
    /// Label shown to the user, including the native name.
    pub label: &'static str,
}

/// Languages offered in the manual language picker, in display order.
pub fn dropdown_languages() -> Vec<LanguageOption> {
    [
        ("en", "US", "English (US)"),
        ("hi", "IN", "Hindi (हिंदी)"),
        ("ja", "JP", "Japanese (日本語)"),
        ("he", "IL", "Hebrew (עברית)"),
        ("ar", "SA", "Arabic (العربية)"),
    ]
    .into_iter()
    .map(|(language, region, label)| LanguageOption {
        id: LanguageId::new(language, region),
        label,
    })
    .collect()
}
