use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::Config;

use super::commands;

/// Entry point for the `promptflow` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "promptflow",
    about = "Keyboard-driven palette for reusable prompt templates",
    version,
    long_about = None
)]
pub struct Cli {
    /// Optional subcommand; without one the interactive palette opens
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Keep prompts in memory only; nothing is read from or written to the store file
    #[arg(long, global = true)]
    pub scratch: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored prompts, optionally filtered by title or tag.
    List(ListArgs),
    /// Store a new prompt.
    Add(AddArgs),
    /// Fill a prompt's variables and print or copy the result.
    Render(RenderArgs),
    /// Save text (argument or piped stdin) as a new prompt.
    Clip(ClipArgs),
    /// Delete a stored prompt.
    Delete(DeleteArgs),
    /// Show or change persisted settings.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive filter on title or tags
    pub query: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Prompt title
    #[arg(long)]
    pub title: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Template text; read from stdin when omitted
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Prompt id, or its title compared ignoring case
    pub prompt: String,

    /// Variable value as NAME=VALUE; repeatable
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Copy the rendered text instead of printing it
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Args)]
pub struct ClipArgs {
    /// Text to store; read from stdin when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Prompt id
    pub id: String,

    /// Skip the confirmation question
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path of the JSON prompt store
    #[arg(long)]
    pub store: Option<std::path::PathBuf>,

    /// Number of rows in the palette list
    #[arg(long)]
    pub list_height: Option<usize>,

    /// Clipboard command line, e.g. "xclip -selection clipboard"
    #[arg(long)]
    pub clipboard: Option<String>,
}

impl Cli {
    pub async fn run(self, config: Config) -> Result<()> {
        commands::run(self, config).await
    }
}
