use anyhow::Result;

use super::types::{ClipboardSettings, Config, LoggingSettings, StorageSettings, UiSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) storage: StorageSettings,
    pub(super) clipboard: ClipboardSettings,
    pub(super) ui: UiSettings,
    pub(super) logging: LoggingSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            storage: StorageSettings::default(),
            clipboard: ClipboardSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
        }
    }

    pub fn with_storage<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut StorageSettings),
    {
        update(&mut self.storage);
        self
    }

    pub fn with_clipboard<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ClipboardSettings),
    {
        update(&mut self.clipboard);
        self
    }

    pub fn with_ui<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut UiSettings),
    {
        update(&mut self.ui);
        self
    }

    pub fn with_logging<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LoggingSettings),
    {
        update(&mut self.logging);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            storage: self.storage,
            clipboard: self.clipboard,
            ui: self.ui,
            logging: self.logging,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
