//! # type2speak
//!
//! A Rust library for "type and hear it" text-to-speech front ends. It sits
//! between a user interface and an on-device speech engine and owns the
//! policy in between.
//!
//! ## Features
//!
//! - **Language detection**: classify typed text by Unicode script
//! - **Capability check**: ask the engine whether the detected language is supported
//! - **Voice selection**: pick a male or female voice from the engine's inventory
//! - **Parameter mapping**: derive engine pitch and rate from user sliders
//! - **Playback control**: an Idle/Speaking state machine with an observable snapshot
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! type2speak = "0.1"
//! ```
//!
//! ```
//! use type2speak::engines::memory::MemoryEngine;
//! use type2speak::{ControllerConfig, PlaybackController};
//!
//! let mut controller = PlaybackController::new(MemoryEngine::new(), ControllerConfig::default());
//! controller.initialize();
//!
//! controller.update_text("Hello, world!");
//! controller.speak();
//! assert!(controller.state().is_speaking);
//!
//! controller.engine_mut().finish_current();
//! controller.process_events();
//! assert!(!controller.state().is_speaking);
//! ```

pub mod config;
pub mod controller;
pub mod engines;
pub mod error;
pub mod language;
pub mod params;
pub mod settings;
pub mod state;
pub mod voice;

use std::fmt;
use std::sync::mpsc;

pub use config::ControllerConfig;
pub use controller::{PlaybackController, RefusalReason, SpeakOutcome};
pub use error::{ConfigError, EngineError, NavigationError};
pub use language::{detect_language, LanguageId};
pub use settings::{open_tts_settings, SettingsLauncher, SettingsTarget};
pub use state::{PlaybackState, SubscriptionId};
pub use voice::{NameHintMatcher, VoiceDescriptor, VoiceGender, VoiceMatcher};

/// Opaque identifier correlating a submitted utterance with its engine events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId(u64);

impl UtteranceId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utterance-{}", self.0)
    }
}

/// Progress notifications delivered by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum UtteranceEvent {
    Started(UtteranceId),
    Done(UtteranceId),
    Error { id: UtteranceId, message: String },
}

impl UtteranceEvent {
    pub fn id(&self) -> UtteranceId {
        match self {
            Self::Started(id) | Self::Done(id) | Self::Error { id, .. } => *id,
        }
    }
}

/// Channel end through which an engine reports [`UtteranceEvent`]s.
pub type EventSender = mpsc::Sender<UtteranceEvent>;

/// How a new utterance interacts with speech already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Drop anything playing or pending, then speak.
    Flush,
    /// Speak after everything already queued.
    Add,
}

/// Engine answer to a language availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageAvailability {
    /// Language known but voice data is missing or unusable.
    Unavailable,
    LanguageAvailable,
    CountryAvailable,
    CountryVariantAvailable,
    /// The engine does not support the language at all.
    NotSupported,
}

impl LanguageAvailability {
    /// True for every "available" answer, at any granularity.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Self::LanguageAvailable | Self::CountryAvailable | Self::CountryVariantAvailable
        )
    }
}

/// Common interface for on-device speech engines.
///
/// Synthesis and audio output are the engine's business. Implementations
/// report utterance progress asynchronously through the [`EventSender`]
/// handed to [`initialize`](SpeechEngine::initialize).
pub trait SpeechEngine {
    /// Start the engine. Events for every later utterance go to `events`.
    fn initialize(&mut self, events: EventSender) -> Result<(), EngineError>;

    fn set_language(&mut self, language: &LanguageId) -> Result<(), EngineError>;

    fn set_voice(&mut self, voice: &VoiceDescriptor) -> Result<(), EngineError>;

    fn set_pitch(&mut self, pitch: f32) -> Result<(), EngineError>;

    fn set_rate(&mut self, rate: f32) -> Result<(), EngineError>;

    fn is_language_available(
        &self,
        language: &LanguageId,
    ) -> Result<LanguageAvailability, EngineError>;

    /// Submit `text` for synthesis under `id`.
    fn speak(&mut self, text: &str, mode: QueueMode, id: UtteranceId) -> Result<(), EngineError>;

    /// Stop speaking and drop anything queued.
    fn stop(&mut self) -> Result<(), EngineError>;

    /// List every voice the engine offers.
    fn voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError>;

    /// Release engine resources.
    ///
    /// Default implementation does nothing.
    fn shutdown(&mut self) {}
}
