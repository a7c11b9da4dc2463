use anyhow::{Result, bail};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.ui.list_height == 0 {
        bail!("ui.list_height must be greater than zero");
    }

    if let Some(command) = &config.clipboard.command {
        if command.trim().is_empty() {
            bail!(
                "clipboard.command is blank. Remove it to auto-detect a clipboard tool or set PROMPTFLOW_CLIPBOARD"
            );
        }
    }

    Ok(())
}
