use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use std::env;
use std::path::PathBuf;

use super::builder::ConfigBuilder;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(path) = env_string("PROMPTFLOW_STORE")? {
        builder = builder.with_storage(|storage| storage.path = PathBuf::from(path));
    }

    if let Some(command) = env_string("PROMPTFLOW_CLIPBOARD")? {
        builder = builder.with_clipboard(|clipboard| clipboard.command = Some(command));
    }

    if let Some(list_height) = env_usize("PROMPTFLOW_LIST_HEIGHT")? {
        builder = builder.with_ui(|ui| ui.list_height = list_height);
    }

    if let Some(level_raw) = env_string("PROMPTFLOW_LOG")? {
        let level = level_raw
            .parse::<LevelFilter>()
            .with_context(|| format!("Failed to parse PROMPTFLOW_LOG value '{level_raw}'"))?;
        builder = builder.with_logging(|logging| logging.level = level);
    }

    if let Some(file) = env_string("PROMPTFLOW_LOG_FILE")? {
        builder = builder.with_logging(|logging| logging.file = PathBuf::from(file));
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_usize(key: &str) -> Result<Option<usize>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Failed to parse {key} as an unsigned integer"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
