use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::config::LoggingSettings;

/// Where log records go for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The palette owns the terminal, so records are appended to the log file.
    File,
    Stderr,
}

pub fn effective_level(settings: &LoggingSettings, verbose: bool) -> LevelFilter {
    if verbose {
        settings.level.max(LevelFilter::Debug)
    } else {
        settings.level
    }
}

/// Install the global logger. `RUST_LOG` still wins over the configured level.
pub fn init(settings: &LoggingSettings, verbose: bool, sink: LogSink) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(effective_level(settings, verbose));
    builder.parse_env("RUST_LOG");
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match sink {
        LogSink::Stderr => {
            builder.target(Target::Stderr);
        }
        LogSink::File => {
            if let Some(parent) = settings.file.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Unable to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&settings.file)
                .with_context(|| format!("Failed to open log file {}", settings.file.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder
        .try_init()
        .context("Logger was already initialised")?;
    Ok(())
}
