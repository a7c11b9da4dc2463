use std::fmt;

use crate::error::PaletteError;
use crate::store::{Prompt, PromptDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Search,
    Filling,
    Editor,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Search => "SEARCH",
            Mode::Filling => "FILLING",
            Mode::Editor => "EDITOR",
        };
        write!(f, "{label}")
    }
}

/// Terminal-independent key presses the palette understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Backspace,
    Enter,
    Esc,
    Up,
    Down,
    Tab,
    BackTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient message shown until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(error: &PaletteError) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: error.to_string(),
        }
    }
}

/// Work the palette asks its host to perform.
///
/// Collaborator effects (`Copy`, `Create`, `Update`, `Delete`, `RecordUsage`)
/// come back to the palette as a [`Completion`]; the rest are UI signals.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Copy { text: String, prompt: Prompt },
    Create(PromptDraft),
    Update(Prompt),
    /// Delete after the confirmation prompt agrees.
    Delete(Prompt),
    RecordUsage(Prompt),
    FocusSearch,
    FocusVariable(String),
    Quit,
}

impl Effect {
    pub fn is_ui_signal(&self) -> bool {
        matches!(
            self,
            Effect::FocusSearch | Effect::FocusVariable(_) | Effect::Quit
        )
    }
}

/// Outcome of an asynchronous collaborator call, fed back as an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Loaded(Result<Vec<Prompt>, PaletteError>),
    Copied {
        prompt: Prompt,
        result: Result<(), PaletteError>,
    },
    Saved(Result<Prompt, PaletteError>),
    Deleted {
        id: String,
        result: Result<(), PaletteError>,
    },
    UsageRecorded(Result<Prompt, PaletteError>),
}
