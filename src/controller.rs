//! Playback state machine.
//!
//! [`PlaybackController`] owns the [`PlaybackState`] and is the only thing
//! that changes it. It moves between two states:
//!
//! ```text
//!            speak() [supported language, non-empty text]
//!   Idle ──────────────────────────────────────────────► Speaking
//!    ▲                                                       │
//!    └──── Done / Error event, stop(), pause() ◄─────────────┘
//! ```
//!
//! Pause is a stop: the engine keeps no position, so resuming restarts the
//! text from the beginning.

use std::sync::mpsc;

use crate::config::ControllerConfig;
use crate::language::{detect_language, dropdown_languages, LanguageId, LanguageOption};
use crate::params::SpeechParams;
use crate::state::{PlaybackState, StateStore, SubscriptionId};
use crate::voice::{NameHintMatcher, VoiceGender, VoiceMatcher};
use crate::{LanguageAvailability, QueueMode, SpeechEngine, UtteranceEvent, UtteranceId};

/// Result of a [`PlaybackController::speak`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    Started(UtteranceId),
    Refused(RefusalReason),
}

/// Why a speak request did not start an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    EmptyText,
    LanguageUnsupported,
    /// The engine never finished initializing.
    EngineUnavailable,
    /// The engine refused the submission.
    EngineRejected,
}

pub struct PlaybackController<E: SpeechEngine, M: VoiceMatcher = NameHintMatcher> {
    engine: E,
    matcher: M,
    config: ControllerConfig,
    store: StateStore,
    events_tx: mpsc::Sender<UtteranceEvent>,
    events_rx: mpsc::Receiver<UtteranceEvent>,
    engine_ready: bool,
    active_utterance: Option<UtteranceId>,
    next_utterance: u64,
}

impl<E: SpeechEngine> PlaybackController<E, NameHintMatcher> {
    /// Create a controller using name-hint voice matching from `config`.
    pub fn new(engine: E, config: ControllerConfig) -> Self {
        let matcher = NameHintMatcher::new(config.voice_rules.clone());
        Self::with_matcher(engine, matcher, config)
    }
}

impl<E: SpeechEngine, M: VoiceMatcher> PlaybackController<E, M> {
    /// Create a controller with a custom voice matching strategy.
    pub fn with_matcher(engine: E, matcher: M, config: ControllerConfig) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            engine,
            matcher,
            config,
            store: StateStore::default(),
            events_tx,
            events_rx,
            engine_ready: false,
            active_utterance: None,
            next_utterance: 0,
        }
    }

    /// Start the engine, select US English and apply the preferred startup voice.
    ///
    /// Returns whether the engine came up. On failure the controller keeps
    /// accepting state updates but refuses to speak.
    pub fn initialize(&mut self) -> bool {
        if let Err(e) = self.engine.initialize(self.events_tx.clone()) {
            log::warn!("Speech engine failed to start: {e}");
            self.engine_ready = false;
            return false;
        }
        self.engine_ready = true;
        log::info!("Speech engine initialized");

        if let Err(e) = self.engine.set_language(&LanguageId::english_us()) {
            log::warn!("Failed to set default language: {e}");
        }
        self.apply_startup_voice();
        true
    }

    pub fn is_engine_ready(&self) -> bool {
        self.engine_ready
    }

    pub fn state(&self) -> &PlaybackState {
        self.store.snapshot()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Observe state changes. See [`StateStore::subscribe`].
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Store new text, detect its language and check engine support for it.
    pub fn update_text(&mut self, text: &str) {
        let detected = detect_language(text);
        log::debug!(
            "Text {:?} detected as {} ({})",
            text,
            detected.display_language(),
            detected
        );

        self.store.update(|s| PlaybackState {
            text: text.to_string(),
            selected_language: detected.clone(),
            ..s.clone()
        });
        self.apply_language(&detected);
    }

    pub fn update_pitch(&mut self, pitch: f32) {
        let Some(pitch) = self.config.slider.clamp(pitch) else {
            log::warn!("Ignoring non-finite pitch {pitch}");
            return;
        };
        self.store.update(|s| PlaybackState { pitch, ..s.clone() });
    }

    pub fn update_speed(&mut self, speed: f32) {
        let Some(speed) = self.config.slider.clamp(speed) else {
            log::warn!("Ignoring non-finite speed {speed}");
            return;
        };
        self.store.update(|s| PlaybackState { speed, ..s.clone() });
    }

    /// Switch between the male and female voice and pick a matching engine voice.
    pub fn toggle_voice_gender(&mut self, is_male: bool) {
        self.store.update(|s| PlaybackState {
            is_male_voice: is_male,
            ..s.clone()
        });
        self.apply_gender_voice(VoiceGender::from_is_male(is_male));
    }

    pub fn toggle_language_dropdown(&mut self) {
        self.store.update(|s| PlaybackState {
            show_language_dropdown: !s.show_language_dropdown,
            ..s.clone()
        });
    }

    /// Pick a language by hand, bypassing detection. Closes the dropdown.
    pub fn select_language_manually(&mut self, language: LanguageId) {
        log::debug!("Language selected manually: {language}");
        self.store.update(|s| PlaybackState {
            selected_language: language.clone(),
            show_language_dropdown: false,
            ..s.clone()
        });
        self.apply_language(&language);
    }

    /// Languages offered for manual selection.
    pub fn available_languages(&self) -> Vec<LanguageOption> {
        dropdown_languages()
    }

    /// Speak the current text from the beginning, replacing any utterance in progress.
    pub fn speak(&mut self) -> SpeakOutcome {
        let current = self.store.snapshot().clone();

        if !current.is_language_supported {
            log::warn!("Language not supported: {}", current.selected_language);
            return SpeakOutcome::Refused(RefusalReason::LanguageUnsupported);
        }
        if current.text.is_empty() {
            log::debug!("Nothing to speak");
            return SpeakOutcome::Refused(RefusalReason::EmptyText);
        }
        if !self.engine_ready {
            log::warn!("Speak requested before the engine was initialized");
            return SpeakOutcome::Refused(RefusalReason::EngineUnavailable);
        }

        self.store.update(|s| PlaybackState {
            is_speaking: true,
            ..s.clone()
        });

        if let Err(e) = self.engine.set_language(&current.selected_language) {
            log::warn!("Failed to set language {}: {e}", current.selected_language);
        }
        let params = SpeechParams::derive(
            current.pitch,
            current.speed,
            current.is_male_voice,
            &self.config.scaling,
        );
        if let Err(e) = self.engine.set_pitch(params.pitch) {
            log::warn!("Failed to set pitch {}: {e}", params.pitch);
        }
        if let Err(e) = self.engine.set_rate(params.rate) {
            log::warn!("Failed to set rate {}: {e}", params.rate);
        }

        let id = UtteranceId::new(self.next_utterance);
        self.next_utterance += 1;

        match self.engine.speak(&current.text, QueueMode::Flush, id) {
            Ok(()) => {
                log::debug!(
                    "Speaking {id} (pitch {:.2}, rate {:.2})",
                    params.pitch,
                    params.rate
                );
                self.active_utterance = Some(id);
                SpeakOutcome::Started(id)
            }
            Err(e) => {
                log::warn!("Engine rejected {id}: {e}");
                self.active_utterance = None;
                self.set_idle();
                SpeakOutcome::Refused(RefusalReason::EngineRejected)
            }
        }
    }

    /// Stop speaking. The engine forgets the utterance.
    pub fn pause_speaking(&mut self) {
        self.halt();
        log::info!("Speech paused");
    }

    /// Restart the current text from the beginning.
    pub fn resume_speaking(&mut self) -> SpeakOutcome {
        let outcome = self.speak();
        log::info!("Speech resumed: {outcome:?}");
        outcome
    }

    pub fn stop_speaking(&mut self) {
        self.halt();
        log::info!("Speech stopped");
    }

    /// Play/pause button: pause while speaking, speak otherwise.
    pub fn toggle_playback(&mut self) -> Option<SpeakOutcome> {
        if self.store.snapshot().is_speaking {
            self.pause_speaking();
            None
        } else {
            Some(self.speak())
        }
    }

    /// Apply one engine event. Events for anything but the active utterance are ignored.
    pub fn handle_event(&mut self, event: UtteranceEvent) {
        if self.active_utterance != Some(event.id()) {
            log::debug!("Ignoring event for stale utterance: {event:?}");
            return;
        }

        match event {
            UtteranceEvent::Started(id) => log::debug!("{id} started"),
            UtteranceEvent::Done(id) => {
                log::debug!("{id} done");
                self.active_utterance = None;
                self.set_idle();
            }
            UtteranceEvent::Error { id, message } => {
                log::warn!("{id} failed: {message}");
                self.active_utterance = None;
                self.set_idle();
            }
        }
    }

    /// Drain and apply every event the engine has delivered so far.
    ///
    /// Returns how many events were processed.
    pub fn process_events(&mut self) -> usize {
        let pending: Vec<UtteranceEvent> = self.events_rx.try_iter().collect();
        let count = pending.len();
        for event in pending {
            self.handle_event(event);
        }
        count
    }

    fn halt(&mut self) {
        if self.engine_ready {
            if let Err(e) = self.engine.stop() {
                log::warn!("Engine stop failed: {e}");
            }
        }
        self.active_utterance = None;
        self.set_idle();
    }

    fn set_idle(&mut self) {
        self.store.update(|s| PlaybackState {
            is_speaking: false,
            ..s.clone()
        });
    }

    fn apply_language(&mut self, language: &LanguageId) {
        if self.engine_ready {
            if let Err(e) = self.engine.set_language(language) {
                log::debug!("Engine did not accept language {language}: {e}");
            }
        }
        self.check_language_support(language);
    }

    fn check_language_support(&mut self, language: &LanguageId) {
        if !self.engine_ready {
            log::debug!("Skipping support check for {language}: engine not ready");
            return;
        }

        let answer = self
            .engine
            .is_language_available(language)
            .unwrap_or_else(|e| {
                log::warn!("Availability query for {language} failed: {e}");
                LanguageAvailability::NotSupported
            });
        let supported = answer.is_supported();
        log::debug!(
            "Language {} ({}): {:?}, supported={}",
            language.display_language(),
            language,
            answer,
            supported
        );

        self.store.update(|s| PlaybackState {
            is_language_supported: supported,
            ..s.clone()
        });
    }

    fn apply_gender_voice(&mut self, gender: VoiceGender) {
        if !self.engine_ready {
            return;
        }
        let voices = match self.engine.voices() {
            Ok(voices) => voices,
            Err(e) => {
                log::warn!("Failed to list voices: {e}");
                return;
            }
        };
        for voice in &voices {
            log::debug!("Voice: {} features={:?}", voice.name, voice.features);
        }

        let Some(voice) = self.matcher.select(&voices, gender) else {
            log::info!("No {gender:?} voice found, keeping current voice");
            return;
        };
        if let Err(e) = self.engine.set_voice(voice) {
            log::warn!("Failed to set voice {}: {e}", voice.name);
            return;
        }
        log::info!("Selected voice: {}", voice.name);

        let pitch = self.config.scaling.voice_pitch(gender.is_male());
        if let Err(e) = self.engine.set_pitch(pitch) {
            log::warn!("Failed to set pitch {pitch}: {e}");
        }
    }

    fn apply_startup_voice(&mut self) {
        let voices = match self.engine.voices() {
            Ok(voices) => voices,
            Err(e) => {
                log::warn!("Failed to list voices: {e}");
                return;
            }
        };
        if let Some(voice) = self.matcher.startup_voice(&voices) {
            match self.engine.set_voice(voice) {
                Ok(()) => log::info!("Using startup voice {}", voice.name),
                Err(e) => log::warn!("Failed to set startup voice {}: {e}", voice.name),
            }
        }
    }
}

impl<E: SpeechEngine, M: VoiceMatcher> Drop for PlaybackController<E, M> {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::memory::MemoryEngine;
    use crate::voice::{VoiceDescriptor, VoiceQuality};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    fn ready(engine: MemoryEngine) -> PlaybackController<MemoryEngine> {
        let mut c = PlaybackController::new(engine, ControllerConfig::default());
        assert!(c.initialize());
        c
    }

    fn ready_default() -> PlaybackController<MemoryEngine> {
        ready(MemoryEngine::new())
    }

    #[test]
    fn speak_with_empty_text_changes_nothing() {
        let mut c = ready_default();
        let before = c.state().clone();
        assert_eq!(c.speak(), SpeakOutcome::Refused(RefusalReason::EmptyText));
        assert_eq!(c.state(), &before);
        assert!(c.engine().spoken().is_empty());
    }

    #[test]
    fn whitespace_only_text_is_spoken() {
        let mut c = ready_default();
        c.update_text(" ");
        assert!(matches!(c.speak(), SpeakOutcome::Started(_)));
        assert!(c.state().is_speaking);
        assert_eq!(c.engine().spoken()[0].text, " ");
    }

    #[test]
    fn availability_query_error_counts_as_unsupported() {
        let engine = MemoryEngine::new().failing_availability("voice data service crashed");
        let mut c = ready(engine);
        c.update_text("Hello");
        assert!(!c.state().is_language_supported);
        assert_eq!(
            c.speak(),
            SpeakOutcome::Refused(RefusalReason::LanguageUnsupported)
        );
    }

    #[test]
    fn rejected_submission_returns_to_idle() {
        let engine = MemoryEngine::new().rejecting_speak("synthesis queue full");
        let mut c = ready(engine);
        c.update_text("Hello");
        assert_eq!(
            c.speak(),
            SpeakOutcome::Refused(RefusalReason::EngineRejected)
        );
        assert!(!c.state().is_speaking);
        assert!(c.engine().spoken().is_empty());
        c.process_events();
        assert!(!c.state().is_speaking);
    }

    #[test]
    fn inverted_slider_range_from_json_does_not_panic() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"slider":{"min":2.0,"max":0.5}}"#).unwrap();
        let mut c = PlaybackController::new(MemoryEngine::new(), config);
        c.update_pitch(1.0);
        c.update_speed(f32::NAN);
        assert_eq!(c.state().pitch, 0.5);
        assert_eq!(c.state().speed, 1.0);
    }

    #[test]
    fn speak_with_unsupported_language_changes_nothing() {
        let mut c = ready_default();
        c.update_text("שלום");
        assert!(!c.state().is_language_supported);
        let before = c.state().clone();

        assert_eq!(
            c.speak(),
            SpeakOutcome::Refused(RefusalReason::LanguageUnsupported)
        );
        assert_eq!(c.state(), &before);
        assert!(c.engine().spoken().is_empty());
    }

    #[test]
    fn speak_before_initialize_is_refused() {
        let mut c = PlaybackController::new(MemoryEngine::new(), ControllerConfig::default());
        c.update_text("hello");
        assert_eq!(
            c.speak(),
            SpeakOutcome::Refused(RefusalReason::EngineUnavailable)
        );
        assert!(!c.state().is_speaking);
    }

    #[test]
    fn failed_initialize_leaves_controller_unready() {
        let mut c = PlaybackController::new(
            MemoryEngine::new().failing_init("missing voice data"),
            ControllerConfig::default(),
        );
        assert!(!c.initialize());
        assert!(!c.is_engine_ready());
        c.update_text("hello");
        assert!(matches!(c.speak(), SpeakOutcome::Refused(_)));
    }

    #[test]
    fn speak_configures_engine_and_sets_speaking() {
        let mut c = ready_default();
        c.update_text("Hello there");
        let outcome = c.speak();
        assert!(matches!(outcome, SpeakOutcome::Started(_)));
        assert!(c.state().is_speaking);

        let spoken = &c.engine().spoken()[0];
        assert_eq!(spoken.text, "Hello there");
        assert_eq!(spoken.mode, QueueMode::Flush);
        assert_eq!(spoken.language, Some(LanguageId::english_us()));
        assert!(approx(spoken.pitch, 1.0));
        assert!(approx(spoken.rate, 0.8));
    }

    #[test]
    fn male_voice_lowers_pitch_at_speak_time() {
        let mut c = ready_default();
        c.update_text("Hello");
        c.update_pitch(1.5);
        c.toggle_voice_gender(true);
        c.speak();
        let spoken = &c.engine().spoken()[0];
        assert!(approx(spoken.pitch, 1.2), "got {}", spoken.pitch);
        assert!(approx(spoken.rate, 0.8));
    }

    #[test]
    fn done_event_returns_to_idle() {
        let mut c = ready_default();
        c.update_text("Hello");
        c.speak();
        c.engine_mut().finish_current();
        // Started + Done
        assert_eq!(c.process_events(), 2);
        assert!(!c.state().is_speaking);
    }

    #[test]
    fn error_event_returns_to_idle() {
        let mut c = ready_default();
        c.update_text("Hello");
        c.speak();
        c.engine_mut().fail_current("synthesis error");
        c.process_events();
        assert!(!c.state().is_speaking);
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut c = ready_default();
        c.update_text("first");
        let SpeakOutcome::Started(first) = c.speak() else {
            panic!("first utterance should start");
        };
        c.update_text("second");
        c.speak();
        c.handle_event(UtteranceEvent::Done(first));
        assert!(c.state().is_speaking);
    }

    #[test]
    fn stop_clears_speaking_and_stops_engine() {
        let mut c = ready_default();
        c.update_text("Hello");
        c.speak();
        c.stop_speaking();
        assert!(!c.state().is_speaking);
        assert_eq!(c.engine().stop_calls(), 1);
        assert_eq!(c.engine().current_utterance(), None);
    }

    #[test]
    fn stop_twice_is_harmless() {
        let mut c = ready_default();
        c.stop_speaking();
        assert!(!c.state().is_speaking);
        c.stop_speaking();
        assert!(!c.state().is_speaking);
        assert_eq!(c.engine().stop_calls(), 2);
    }

    #[test]
    fn pause_then_resume_restarts_from_the_beginning() {
        let mut c = ready_default();
        c.update_text("A long paragraph");
        c.speak();
        c.pause_speaking();
        assert!(!c.state().is_speaking);
        assert_eq!(c.engine().stop_calls(), 1);

        assert!(matches!(c.resume_speaking(), SpeakOutcome::Started(_)));
        assert!(c.state().is_speaking);
        let spoken = c.engine().spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "A long paragraph");
        assert_ne!(spoken[0].id, spoken[1].id);
    }

    #[test]
    fn toggle_playback_alternates() {
        let mut c = ready_default();
        c.update_text("Hello");
        assert!(matches!(
            c.toggle_playback(),
            Some(SpeakOutcome::Started(_))
        ));
        assert_eq!(c.toggle_playback(), None);
        assert!(!c.state().is_speaking);
    }

    #[test]
    fn update_text_detects_language_and_checks_support() {
        let engine = MemoryEngine::with_voices(vec![
            VoiceDescriptor::new("en-us-x-sfg-local", LanguageId::english_us()),
            VoiceDescriptor::new("hi-in-x-hia-local", LanguageId::new("hi", "IN")),
        ]);
        let mut c = ready(engine);

        c.update_text("नमस्ते");
        assert_eq!(c.state().selected_language, LanguageId::new("hi", "IN"));
        assert!(c.state().is_language_supported);
        assert_eq!(c.engine().language(), Some(&LanguageId::new("hi", "IN")));

        c.update_text("مرحبا");
        assert_eq!(c.state().selected_language, LanguageId::new("ar", "SA"));
        assert!(!c.state().is_language_supported);
    }

    #[test]
    fn manual_selection_closes_dropdown_and_rechecks_support() {
        let engine = MemoryEngine::new()
            .with_availability(LanguageId::new("ja", "JP"), LanguageAvailability::Unavailable);
        let mut c = ready(engine);

        c.toggle_language_dropdown();
        assert!(c.state().show_language_dropdown);
        c.select_language_manually(LanguageId::new("ja", "JP"));
        assert!(!c.state().show_language_dropdown);
        assert_eq!(c.state().selected_language, LanguageId::new("ja", "JP"));
        assert!(!c.state().is_language_supported);

        c.toggle_language_dropdown();
        c.select_language_manually(LanguageId::english_us());
        assert!(!c.state().show_language_dropdown);
        assert!(c.state().is_language_supported);
    }

    #[test]
    fn manual_selection_is_spoken_with_selected_language() {
        let engine = MemoryEngine::new().with_availability(
            LanguageId::new("hi", "IN"),
            LanguageAvailability::CountryVariantAvailable,
        );
        let mut c = ready(engine);
        c.update_text("namaste");
        c.select_language_manually(LanguageId::new("hi", "IN"));
        c.speak();
        assert_eq!(
            c.engine().spoken()[0].language,
            Some(LanguageId::new("hi", "IN"))
        );
    }

    #[test]
    fn gender_toggle_selects_voice_and_sets_pitch() {
        let mut c = ready_default();
        c.toggle_voice_gender(true);
        assert!(c.state().is_male_voice);
        assert_eq!(
            c.engine().voice().map(|v| v.name.as_str()),
            Some("en-us-x-iob-local")
        );
        assert_eq!(c.engine().pitch_history().last(), Some(&0.8));

        c.toggle_voice_gender(false);
        assert!(!c.state().is_male_voice);
        assert_eq!(
            c.engine().voice().map(|v| v.name.as_str()),
            Some("en-us-x-sfg-local")
        );
        assert_eq!(c.engine().pitch_history().last(), Some(&1.0));
    }

    #[test]
    fn gender_toggle_without_match_keeps_engine_voice() {
        let engine = MemoryEngine::with_voices(vec![VoiceDescriptor::new(
            "hi-in-x-hia-local",
            LanguageId::new("hi", "IN"),
        )]);
        let mut c = ready(engine);
        c.toggle_voice_gender(true);
        assert!(c.state().is_male_voice);
        assert!(c.engine().voice().is_none());
        assert!(c.engine().pitch_history().is_empty());
    }

    #[test]
    fn initialize_applies_enhanced_startup_voice() {
        let mut enhanced = VoiceDescriptor::new("en-us-enhanced", LanguageId::english_us());
        enhanced.quality = VoiceQuality::VERY_HIGH;
        let engine = MemoryEngine::with_voices(vec![
            VoiceDescriptor::new("en-us-x-sfg-local", LanguageId::english_us()),
            enhanced,
        ]);
        let c = ready(engine);
        assert_eq!(
            c.engine().voice().map(|v| v.name.as_str()),
            Some("en-us-enhanced")
        );
        assert_eq!(c.engine().language(), Some(&LanguageId::english_us()));
    }

    #[test]
    fn sliders_are_clamped() {
        let mut c = ready_default();
        c.update_pitch(5.0);
        c.update_speed(0.1);
        assert_eq!(c.state().pitch, 2.0);
        assert_eq!(c.state().speed, 0.5);
        c.update_pitch(f32::NAN);
        assert_eq!(c.state().pitch, 2.0);
    }

    #[test]
    fn observers_follow_speaking_transitions() {
        let mut c = ready_default();
        let speaking = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&speaking);
        c.subscribe(move |s| {
            let mut seen = sink.borrow_mut();
            if seen.last() != Some(&s.is_speaking) {
                seen.push(s.is_speaking);
            }
        });

        c.update_text("Hello");
        c.speak();
        c.engine_mut().finish_current();
        c.process_events();

        assert_eq!(*speaking.borrow(), vec![false, true, false]);
    }

    #[test]
    fn dropping_controller_shuts_engine_down() {
        struct Probe(Rc<RefCell<bool>>, MemoryEngine);

        impl SpeechEngine for Probe {
            fn initialize(&mut self, events: crate::EventSender) -> Result<(), crate::EngineError> {
                self.1.initialize(events)
            }
            fn set_language(&mut self, l: &LanguageId) -> Result<(), crate::EngineError> {
                self.1.set_language(l)
            }
            fn set_voice(&mut self, v: &VoiceDescriptor) -> Result<(), crate::EngineError> {
                self.1.set_voice(v)
            }
            fn set_pitch(&mut self, p: f32) -> Result<(), crate::EngineError> {
                self.1.set_pitch(p)
            }
            fn set_rate(&mut self, r: f32) -> Result<(), crate::EngineError> {
                self.1.set_rate(r)
            }
            fn is_language_available(
                &self,
                l: &LanguageId,
            ) -> Result<LanguageAvailability, crate::EngineError> {
                self.1.is_language_available(l)
            }
            fn speak(
                &mut self,
                t: &str,
                m: QueueMode,
                id: UtteranceId,
            ) -> Result<(), crate::EngineError> {
                self.1.speak(t, m, id)
            }
            fn stop(&mut self) -> Result<(), crate::EngineError> {
                self.1.stop()
            }
            fn voices(&self) -> Result<Vec<VoiceDescriptor>, crate::EngineError> {
                self.1.voices()
            }
            fn shutdown(&mut self) {
                *self.0.borrow_mut() = true;
            }
        }

        let released = Rc::new(RefCell::new(false));
        let mut c = PlaybackController::new(
            Probe(Rc::clone(&released), MemoryEngine::new()),
            ControllerConfig::default(),
        );
        c.initialize();
        drop(c);
        assert!(*released.borrow());
    }

    #[test]
    fn available_languages_lists_dropdown_entries() {
        let c = ready_default();
        let labels: Vec<_> = c.available_languages().iter().map(|o| o.label).collect();
        assert_eq!(labels[0], "English (US)");
        assert_eq!(labels.len(), 5);
    }
}
