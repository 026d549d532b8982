//! In-process speech engine.
//!
//! [`MemoryEngine`] produces no audio. It keeps a voice inventory and an
//! availability table, records every request it receives, and reports
//! utterance progress only when the host calls
//! [`finish_current`](MemoryEngine::finish_current) or
//! [`fail_current`](MemoryEngine::fail_current).
//!
//! ```
//! use type2speak::engines::memory::MemoryEngine;
//! use type2speak::{QueueMode, SpeechEngine, UtteranceEvent, UtteranceId};
//! use std::sync::mpsc;
//!
//! let (tx, rx) = mpsc::channel();
//! let mut engine = MemoryEngine::new();
//! engine.initialize(tx)?;
//! engine.speak("hello", QueueMode::Flush, UtteranceId::new(1))?;
//! engine.finish_current();
//!
//! let events: Vec<_> = rx.try_iter().collect();
//! assert_eq!(events.last(), Some(&UtteranceEvent::Done(UtteranceId::new(1))));
//! # Ok::<(), type2speak::EngineError>(())
//! ```

use std::collections::HashMap;

use crate::language::LanguageId;
use crate::voice::VoiceDescriptor;
use crate::{
    EngineError, EventSender, LanguageAvailability, QueueMode, SpeechEngine, UtteranceEvent,
    UtteranceId,
};

/// An utterance accepted by [`MemoryEngine::speak`], with the settings in force at submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenUtterance {
    pub id: UtteranceId,
    pub text: String,
    pub mode: QueueMode,
    pub language: Option<LanguageId>,
    pub voice: Option<String>,
    pub pitch: f32,
    pub rate: f32,
}

#[derive(Debug)]
pub struct MemoryEngine {
    voices: Vec<VoiceDescriptor>,
    availability: HashMap<LanguageId, LanguageAvailability>,
    init_failure: Option<String>,
    availability_failure: Option<String>,
    speak_rejection: Option<String>,
    events: Option<EventSender>,
    language: Option<LanguageId>,
    voice: Option<VoiceDescriptor>,
    pitch: f32,
    rate: f32,
    pitch_history: Vec<f32>,
    current: Option<UtteranceId>,
    spoken: Vec<SpokenUtterance>,
    stop_calls: usize,
    shut_down: bool,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Create an engine with a small English inventory.
    pub fn new() -> Self {
        let en_us = LanguageId::english_us();
        Self::with_voices(vec![
            VoiceDescriptor::new("en-us-x-sfg-local", en_us.clone()),
            VoiceDescriptor::new("en-us-x-iob-local", en_us.clone()),
            VoiceDescriptor::new("en-gb-x-gba-local", LanguageId::new("en", "GB")),
        ])
    }

    /// Create an engine with exactly the given inventory.
    pub fn with_voices(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            voices,
            availability: HashMap::new(),
            init_failure: None,
            availability_failure: None,
            speak_rejection: None,
            events: None,
            language: None,
            voice: None,
            pitch: 1.0,
            rate: 1.0,
            pitch_history: Vec::new(),
            current: None,
            spoken: Vec::new(),
            stop_calls: 0,
            shut_down: false,
        }
    }

    /// Override the availability answer for one language.
    pub fn with_availability(mut self, language: LanguageId, answer: LanguageAvailability) -> Self {
        self.availability.insert(language, answer);
        self
    }

    /// Make [`initialize`](SpeechEngine::initialize) fail with `reason`.
    pub fn failing_init(mut self, reason: impl Into<String>) -> Self {
        self.init_failure = Some(reason.into());
        self
    }

    /// Make every [`is_language_available`](SpeechEngine::is_language_available) query fail.
    pub fn failing_availability(mut self, reason: impl Into<String>) -> Self {
        self.availability_failure = Some(reason.into());
        self
    }

    /// Make every [`speak`](SpeechEngine::speak) submission fail.
    pub fn rejecting_speak(mut self, reason: impl Into<String>) -> Self {
        self.speak_rejection = Some(reason.into());
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.events.is_some()
    }

    pub fn language(&self) -> Option<&LanguageId> {
        self.language.as_ref()
    }

    pub fn voice(&self) -> Option<&VoiceDescriptor> {
        self.voice.as_ref()
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Every pitch passed to `set_pitch`, oldest first.
    pub fn pitch_history(&self) -> &[f32] {
        &self.pitch_history
    }

    pub fn current_utterance(&self) -> Option<UtteranceId> {
        self.current
    }

    pub fn spoken(&self) -> &[SpokenUtterance] {
        &self.spoken
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Complete the current utterance and report `Done`.
    ///
    /// Returns the finished id, or `None` when nothing was playing.
    pub fn finish_current(&mut self) -> Option<UtteranceId> {
        let id = self.current.take()?;
        self.emit(UtteranceEvent::Done(id));
        Some(id)
    }

    /// Abort the current utterance and report `Error`.
    pub fn fail_current(&mut self, message: impl Into<String>) -> Option<UtteranceId> {
        let id = self.current.take()?;
        self.emit(UtteranceEvent::Error {
            id,
            message: message.into(),
        });
        Some(id)
    }

    fn emit(&self, event: UtteranceEvent) {
        if let Some(events) = &self.events {
            // Receiver gone means nobody is listening any more.
            if events.send(event).is_err() {
                log::debug!("MemoryEngine: event receiver dropped");
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        if self.events.is_none() {
            return Err(EngineError::NotInitialized);
        }
        Ok(())
    }

    fn derived_availability(&self, language: &LanguageId) -> LanguageAvailability {
        if self.voices.iter().any(|v| &v.locale == language) {
            LanguageAvailability::CountryAvailable
        } else if self.voices.iter().any(|v| v.locale.same_language(language)) {
            LanguageAvailability::LanguageAvailable
        } else {
            LanguageAvailability::NotSupported
        }
    }
}

impl SpeechEngine for MemoryEngine {
    fn initialize(&mut self, events: EventSender) -> Result<(), EngineError> {
        if let Some(reason) = &self.init_failure {
            return Err(EngineError::InitFailed(reason.clone()));
        }
        self.events = Some(events);
        self.shut_down = false;
        Ok(())
    }

    fn set_language(&mut self, language: &LanguageId) -> Result<(), EngineError> {
        self.ensure_ready()?;
        if !self.is_language_available(language)?.is_supported() {
            return Err(EngineError::LanguageUnavailable(language.clone()));
        }
        self.language = Some(language.clone());
        Ok(())
    }

    fn set_voice(&mut self, voice: &VoiceDescriptor) -> Result<(), EngineError> {
        self.ensure_ready()?;
        let known = self
            .voices
            .iter()
            .find(|v| v.name == voice.name)
            .ok_or_else(|| EngineError::VoiceNotFound(voice.name.clone()))?;
        self.voice = Some(known.clone());
        Ok(())
    }

    fn set_pitch(&mut self, pitch: f32) -> Result<(), EngineError> {
        self.ensure_ready()?;
        if !(pitch.is_finite() && pitch > 0.0) {
            return Err(EngineError::Rejected(format!("pitch {pitch} out of range")));
        }
        self.pitch = pitch;
        self.pitch_history.push(pitch);
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<(), EngineError> {
        self.ensure_ready()?;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(EngineError::Rejected(format!("rate {rate} out of range")));
        }
        self.rate = rate;
        Ok(())
    }

    fn is_language_available(
        &self,
        language: &LanguageId,
    ) -> Result<LanguageAvailability, EngineError> {
        self.ensure_ready()?;
        if let Some(reason) = &self.availability_failure {
            return Err(EngineError::Backend(reason.clone()));
        }
        Ok(self
            .availability
            .get(language)
            .copied()
            .unwrap_or_else(|| self.derived_availability(language)))
    }

    fn speak(&mut self, text: &str, mode: QueueMode, id: UtteranceId) -> Result<(), EngineError> {
        self.ensure_ready()?;
        if let Some(reason) = &self.speak_rejection {
            return Err(EngineError::Rejected(reason.clone()));
        }
        if mode == QueueMode::Add && self.current.is_some() {
            return Err(EngineError::Rejected(
                "queueing behind a playing utterance is not supported".to_string(),
            ));
        }
        self.current = Some(id);
        self.spoken.push(SpokenUtterance {
            id,
            text: text.to_string(),
            mode,
            language: self.language.clone(),
            voice: self.voice.as_ref().map(|v| v.name.clone()),
            pitch: self.pitch,
            rate: self.rate,
        });
        self.emit(UtteranceEvent::Started(id));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        self.ensure_ready()?;
        self.stop_calls += 1;
        self.current = None;
        Ok(())
    }

    fn voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError> {
        self.ensure_ready()?;
        Ok(self.voices.clone())
    }

    fn shutdown(&mut self) {
        self.events = None;
        self.current = None;
        self.shut_down = true;
    }
}
