use anyhow::{Context, Result};
use dirs::home_dir;
use log::LevelFilter;
use std::{fs, path::Path};

use super::builder::ConfigBuilder;
use super::constants::{APP_DIR, CONFIG_FILE};
use super::environment::apply_env_overrides;
use super::types::{FileConfig, PersistedConfig};
use super::validation::validate;
use super::Config;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    #[cfg(test)]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;

        let config = builder.build()?;
        validate(&config)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
            .with_context(|| format!("Invalid setting in {}", path.display()))
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let level = match self.logging.level {
            Some(raw) => Some(
                raw.parse::<LevelFilter>()
                    .with_context(|| format!("Unknown log level '{raw}'"))?,
            ),
            None => None,
        };

        Ok(builder
            .with_storage(|storage| {
                if let Some(path) = self.storage.path {
                    storage.path = path;
                }
            })
            .with_clipboard(|clipboard| {
                if let Some(command) = self.clipboard.command {
                    clipboard.command = Some(command);
                }
            })
            .with_ui(|ui| {
                if let Some(list_height) = self.ui.list_height {
                    ui.list_height = list_height;
                }
            })
            .with_logging(|logging| {
                if let Some(level) = level {
                    logging.level = level;
                }
                if let Some(file) = self.logging.file {
                    logging.file = file;
                }
            }))
    }
}
