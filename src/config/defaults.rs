use std::path::PathBuf;

use super::constants::*;
use super::types::{ClipboardSettings, LoggingSettings, StorageSettings, UiSettings};

/// `~/.promptflow`, or `./.promptflow` when no home directory is known.
pub fn default_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: default_app_dir().join(DEFAULT_STORE_FILE),
        }
    }
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self { command: None }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            list_height: DEFAULT_LIST_HEIGHT,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            file: default_app_dir().join(DEFAULT_LOG_FILE),
        }
    }
}
