//! Navigation to the host platform's settings screens.

use std::fmt;

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTarget {
    /// The platform's text-to-speech settings, where voice data is installed.
    TextToSpeech,
    General,
}

impl fmt::Display for SettingsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextToSpeech => f.write_str("text-to-speech settings"),
            Self::General => f.write_str("settings"),
        }
    }
}

/// Opens settings screens on the host platform.
pub trait SettingsLauncher {
    fn open(&mut self, target: SettingsTarget) -> Result<(), NavigationError>;
}

/// Open the text-to-speech settings, falling back to the general settings screen.
///
/// Returns the screen that opened, or `None` if neither could be shown.
pub fn open_tts_settings<L: SettingsLauncher + ?Sized>(launcher: &mut L) -> Option<SettingsTarget> {
    [SettingsTarget::TextToSpeech, SettingsTarget::General]
        .into_iter()
        .find(|&target| match launcher.open(target) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not open {target}: {e}");
                false
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeLauncher {
        missing: Vec<SettingsTarget>,
        opened: Vec<SettingsTarget>,
    }

    impl SettingsLauncher for FakeLauncher {
        fn open(&mut self, target: SettingsTarget) -> Result<(), NavigationError> {
            if self.missing.contains(&target) {
                return Err(NavigationError::TargetNotFound(target.to_string()));
            }
            self.opened.push(target);
            Ok(())
        }
    }

    #[test]
    fn opens_tts_settings_when_available() {
        let mut launcher = FakeLauncher::default();
        assert_eq!(open_tts_settings(&mut launcher), Some(SettingsTarget::TextToSpeech));
        assert_eq!(launcher.opened, vec![SettingsTarget::TextToSpeech]);
    }

    #[test]
    fn falls_back_to_general_settings() {
        let mut launcher = FakeLauncher {
            missing: vec![SettingsTarget::TextToSpeech],
            ..Default::default()
        };
        assert_eq!(open_tts_settings(&mut launcher), Some(SettingsTarget::General));
        assert_eq!(launcher.opened, vec![SettingsTarget::General]);
    }

    #[test]
    fn gives_up_quietly_when_nothing_opens() {
        let mut launcher = FakeLauncher {
            missing: vec![SettingsTarget::TextToSpeech, SettingsTarget::General],
            ..Default::default()
        };
        assert_eq!(open_tts_settings(&mut launcher), None);
        assert!(launcher.opened.is_empty());
    }
}
