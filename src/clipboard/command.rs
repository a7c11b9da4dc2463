use std::env;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{ClipboardError, ClipboardWriter};

/// A program plus arguments that reads clipboard text from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Parse a whitespace separated command line such as `xclip -selection clipboard`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Clipboard writer that shells out to a clipboard tool.
#[derive(Debug, Clone, Default)]
pub struct CommandClipboard {
    command: Option<ClipboardCommand>,
}

fn env_var_is_set(key: &str) -> bool {
    env::var_os(key).is_some()
}

fn binary_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

impl CommandClipboard {
    pub fn new(command: Option<ClipboardCommand>) -> Self {
        Self { command }
    }

    /// Use the configured command line if any, otherwise detect a provider.
    pub fn from_config(command_line: Option<&str>) -> Self {
        match command_line.and_then(ClipboardCommand::parse) {
            Some(command) => Self::new(Some(command)),
            None => Self::detect(),
        }
    }

    pub fn detect() -> Self {
        let command = if cfg!(target_os = "macos") && binary_exists("pbcopy") {
            Some(ClipboardCommand::new("pbcopy", &[]))
        } else if env_var_is_set("WAYLAND_DISPLAY") && binary_exists("wl-copy") {
            Some(ClipboardCommand::new("wl-copy", &["--type", "text/plain"]))
        } else if env_var_is_set("DISPLAY") && binary_exists("xclip") {
            Some(ClipboardCommand::new("xclip", &["-i", "-selection", "clipboard"]))
        } else if env_var_is_set("DISPLAY") && binary_exists("xsel") {
            Some(ClipboardCommand::new("xsel", &["-i", "-b"]))
        } else if binary_exists("termux-clipboard-set") {
            Some(ClipboardCommand::new("termux-clipboard-set", &[]))
        } else if env_var_is_set("TMUX") && binary_exists("tmux") {
            Some(ClipboardCommand::new("tmux", &["load-buffer", "-w", "-"]))
        } else {
            None
        };

        match &command {
            Some(found) => log::debug!("using clipboard provider {}", found.program),
            None => log::warn!("no clipboard provider detected"),
        }

        Self { command }
    }

    #[cfg(test)]
    pub fn command(&self) -> Option<&ClipboardCommand> {
        self.command.as_ref()
    }
}

#[async_trait]
impl ClipboardWriter for CommandClipboard {
    fn name(&self) -> String {
        match &self.command {
            Some(command) => command.program.clone(),
            None => "none".to_string(),
        }
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let command = self.command.as_ref().ok_or(ClipboardError::NoProvider)?;

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child.stdin.take().ok_or(ClipboardError::StdinWriteFailed)?;
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|_| ClipboardError::StdinWriteFailed)?;
        drop(stdin);

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed {
                program: command.program.clone(),
                status: status.to_string(),
            })
        }
    }
}
