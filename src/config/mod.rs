//! Configuration management for the promptflow palette.
//!
//! This module provides a layered configuration system:
//! - Defaults rooted in `~/.promptflow`
//! - An optional JSON file at `~/.promptflow/config`
//! - Environment variable overrides
//! - Builder pattern for programmatic configuration
//! - Validation of the assembled settings

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{Config, LoggingSettings};
