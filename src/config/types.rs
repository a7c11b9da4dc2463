use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub storage: StorageSettings,
    pub clipboard: ClipboardSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardSettings {
    /// Command line that reads clipboard text on stdin; `None` means detect.
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    pub list_height: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub file: PathBuf,
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub storage: FileStorageSettings,
    pub clipboard: FileClipboardSettings,
    pub ui: FileUiSettings,
    pub logging: FileLoggingSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileStorageSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileClipboardSettings {
    pub command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileUiSettings {
    pub list_height: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileLoggingSettings {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

// Serialization helpers
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub storage: PersistedStorage<'a>,
    pub clipboard: PersistedClipboard<'a>,
    pub ui: PersistedUi,
    pub logging: PersistedLogging<'a>,
}

#[derive(Serialize)]
pub(super) struct PersistedStorage<'a> {
    pub path: &'a Path,
}

#[derive(Serialize)]
pub(super) struct PersistedClipboard<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<&'a str>,
}

#[derive(Serialize)]
pub(super) struct PersistedUi {
    pub list_height: usize,
}

#[derive(Serialize)]
pub(super) struct PersistedLogging<'a> {
    pub level: String,
    pub file: &'a Path,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            storage: PersistedStorage {
                path: &config.storage.path,
            },
            clipboard: PersistedClipboard {
                command: config.clipboard.command.as_deref(),
            },
            ui: PersistedUi {
                list_height: config.ui.list_height,
            },
            logging: PersistedLogging {
                level: config.logging.level.to_string().to_lowercase(),
                file: &config.logging.file,
            },
        }
    }
}
