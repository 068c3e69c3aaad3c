use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default focus session length in minutes
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
/// Default short break length in minutes
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
/// Default long break length in minutes
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

/// Timer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Display name for the mode tabs
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Focus => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Hotkey that selects this mode
    pub fn key(&self) -> char {
        match self {
            Mode::Focus => '1',
            Mode::ShortBreak => '2',
            Mode::LongBreak => '3',
        }
    }

    /// Get all modes in tab order
    pub fn all() -> [Mode; 3] {
        [Mode::Focus, Mode::ShortBreak, Mode::LongBreak]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("mode duration must be a positive number of minutes")]
    NotPositive,
}

/// Configured length of each mode, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeDurations {
    #[serde(default = "default_focus")]
    pub focus: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
}

fn default_focus() -> u32 {
    DEFAULT_FOCUS_MINUTES
}

fn default_short_break() -> u32 {
    DEFAULT_SHORT_BREAK_MINUTES
}

fn default_long_break() -> u32 {
    DEFAULT_LONG_BREAK_MINUTES
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS_MINUTES,
            short_break: DEFAULT_SHORT_BREAK_MINUTES,
            long_break: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

impl ModeDurations {
    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    pub fn set(&mut self, mode: Mode, minutes: u32) -> Result<(), DurationError> {
        if minutes == 0 {
            return Err(DurationError::NotPositive);
        }
        match mode {
            Mode::Focus => self.focus = minutes,
            Mode::ShortBreak => self.short_break = minutes,
            Mode::LongBreak => self.long_break = minutes,
        }
        Ok(())
    }

    /// Replace any zero values (e.g. from a hand-edited settings file) with defaults
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            focus: if self.focus == 0 { defaults.focus } else { self.focus },
            short_break: if self.short_break == 0 {
                defaults.short_break
            } else {
                self.short_break
            },
            long_break: if self.long_break == 0 {
                defaults.long_break
            } else {
                self.long_break
            },
        }
    }
}

/// Committed mode durations plus the settings dialog's uncommitted copy
#[derive(Debug, Clone, Default)]
pub struct ModeConfig {
    committed: ModeDurations,
    draft: Option<ModeDurations>,
}

impl ModeConfig {
    pub fn new(committed: ModeDurations) -> Self {
        Self {
            committed: committed.sanitized(),
            draft: None,
        }
    }

    pub fn committed(&self) -> &ModeDurations {
        &self.committed
    }

    pub fn draft(&self) -> Option<&ModeDurations> {
        self.draft.as_ref()
    }

    /// Start editing: the draft begins as a copy of the committed values
    pub fn open_draft(&mut self) {
        self.draft = Some(self.committed);
    }

    /// Store a duration into the draft, opening one if needed
    pub fn set_duration(&mut self, mode: Mode, minutes: u32) -> Result<(), DurationError> {
        let committed = self.committed;
        self.draft.get_or_insert(committed).set(mode, minutes)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Commit the draft as a whole. Returns true if the committed values changed.
    pub fn apply(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) if draft != self.committed => {
                self.committed = draft;
                true
            }
            _ => false,
        }
    }
}
