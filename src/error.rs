use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Failures the palette reports to the user without leaving the current mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Malformed placeholder syntax. Never raised: such tokens are simply not extracted.
    #[allow(dead_code)]
    #[error("malformed placeholder ignored")]
    ParseNoop,
    #[error("prompt store error: {0}")]
    StoreIo(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
    #[error("{0}")]
    Validation(String),
}

impl PaletteError {
    pub fn store(error: anyhow::Error) -> Self {
        Self::StoreIo(format!("{error:#}"))
    }
}

impl From<ClipboardError> for PaletteError {
    fn from(error: ClipboardError) -> Self {
        Self::Clipboard(error.to_string())
    }
}
