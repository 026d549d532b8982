//! Observable playback state.
//!
//! [`PlaybackState`] is an immutable snapshot. [`StateStore`] holds the
//! current snapshot, replaces it wholesale on every change and notifies
//! subscribed observers.

use serde::Serialize;

use crate::language::LanguageId;

/// Snapshot of everything a presentation layer needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub text: String,
    /// Pitch slider value, 0.5–2.0.
    pub pitch: f32,
    /// Speed slider value, 0.5–2.0.
    pub speed: f32,
    pub is_male_voice: bool,
    pub selected_language: LanguageId,
    pub is_language_supported: bool,
    /// True only between a successful speak and the matching done/error/stop.
    pub is_speaking: bool,
    pub is_loading: bool,
    /// Reserved for playback progress; never updated.
    pub progress: f32,
    pub show_language_dropdown: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            text: String::new(),
            pitch: 1.0,
            speed: 1.0,
            is_male_voice: false,
            selected_language: LanguageId::english_us(),
            is_language_supported: true,
            is_speaking: false,
            is_loading: false,
            progress: 0.0,
            show_language_dropdown: false,
        }
    }
}

/// Handle returned by [`StateStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&PlaybackState)>;

pub struct StateStore {
    current: PlaybackState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(PlaybackState::default())
    }
}

impl StateStore {
    pub fn new(initial: PlaybackState) -> Self {
        Self {
            current: initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn snapshot(&self) -> &PlaybackState {
        &self.current
    }

    /// Register an observer. It is called once with the current snapshot,
    /// then again after every change.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        observer(&self.current);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Replace the snapshot with `f(current)`.
    ///
    /// Observers are only notified when the new snapshot differs.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&PlaybackState) -> PlaybackState,
    {
        let next = f(&self.current);
        if next == self.current {
            return;
        }
        self.current = next;
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.current);
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
