use crate::language::LanguageId;

/// Errors reported by a [`SpeechEngine`](crate::SpeechEngine) implementation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Speech engine not initialized. Call initialize() first.")]
    NotInitialized,
    #[error("Speech engine failed to initialize: {0}")]
    InitFailed(String),
    #[error("Language '{0}' is not available on this engine")]
    LanguageUnavailable(LanguageId),
    #[error("Voice '{0}' not found. Call voices() to see available voices.")]
    VoiceNotFound(String),
    #[error("Engine rejected the request: {0}")]
    Rejected(String),
    #[error("Engine backend error: {0}")]
    Backend(String),
}

/// Errors produced while loading or validating a [`ControllerConfig`](crate::ControllerConfig).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Raised by a [`SettingsLauncher`](crate::SettingsLauncher) when a settings screen cannot be opened.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No handler for settings target '{0}'")]
    TargetNotFound(String),
    #[error("Navigation failed: {0}")]
    Failed(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageIdError {
    #[error("Empty language tag")]
    Empty,
    #[error("Invalid language code '{0}' (expected 2-3 ASCII letters)")]
    InvalidLanguage(String),
    #[error("Invalid region code '{0}' (expected 2 ASCII letters or 3 digits)")]
    InvalidRegion(String),
    #[error("Unexpected trailing subtag in '{0}'")]
    TrailingSubtag(String),
}
