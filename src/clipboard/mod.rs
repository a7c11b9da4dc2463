//! Clipboard collaborator.
//!
//! The palette only needs to write text. The command-backed writer pipes the
//! text into whichever system clipboard tool is available.

mod command;

use async_trait::async_trait;
use thiserror::Error;

pub use command::CommandClipboard;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no clipboard provider available (set clipboard.command or PROMPTFLOW_CLIPBOARD)")]
    NoProvider,
    #[error("failed to write to clipboard provider's stdin")]
    StdinWriteFailed,
    #[error("clipboard provider `{program}` exited with {status}")]
    CommandFailed { program: String, status: String },
}

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    fn name(&self) -> String;

    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}
