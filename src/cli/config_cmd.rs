use anyhow::Result;
use colored::*;

use crate::config::Config;

use super::args::ConfigArgs;

pub(crate) fn handle_config(args: ConfigArgs, config: Config) -> Result<()> {
    let mut updated = config;
    let changed = apply_args(&args, &mut updated);

    if changed {
        updated.validate()?;
        updated.save()?;
        println!(
            "✅ Configuration saved to {}",
            Config::config_path()?.display()
        );
    }

    println!("📋 Current configuration:");
    println!("   Store: {}", updated.storage.path.display());
    println!(
        "   Clipboard: {}",
        updated
            .clipboard
            .command
            .as_deref()
            .unwrap_or("auto-detect")
    );
    println!("   List Height: {}", updated.ui.list_height);
    println!("   Log Level: {}", updated.logging.level);
    println!("   Log File: {}", updated.logging.file.display());

    if !changed {
        println!(
            "{}",
            "ℹ️  Use --store, --list-height or --clipboard to change settings.".dimmed()
        );
    }
    Ok(())
}

/// Copy the given flags into `config`; returns whether anything was set.
fn apply_args(args: &ConfigArgs, config: &mut Config) -> bool {
    let mut changed = false;

    if let Some(store) = &args.store {
        config.storage.path = store.clone();
        changed = true;
    }

    if let Some(list_height) = args.list_height {
        config.ui.list_height = list_height;
        changed = true;
    }

    if let Some(command) = &args.clipboard {
        config.clipboard.command = if command.trim().eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(command.clone())
        };
        changed = true;
    }

    changed
}
