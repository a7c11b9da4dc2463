use anyhow::{Result, bail};
use std::io::{self, IsTerminal, Read};

use crate::template::VariableValues;

const CLIP_TITLE_PREFIX: &str = "Clipped: ";
const CLIP_TITLE_CHARS: usize = 30;

pub(crate) fn read_piped_stdin() -> Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;

    if buffer.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}

/// Title for clipped text: the first thirty characters, with `...` when cut.
pub(crate) fn clip_title(text: &str) -> String {
    let trimmed = text.trim();
    let head: String = trimmed.chars().take(CLIP_TITLE_CHARS).collect();
    if trimmed.chars().count() > CLIP_TITLE_CHARS {
        format!("{CLIP_TITLE_PREFIX}{head}...")
    } else {
        format!("{CLIP_TITLE_PREFIX}{head}")
    }
}

/// Parse repeated `NAME=VALUE` arguments. Later pairs win.
pub(crate) fn parse_var_pairs(pairs: &[String]) -> Result<VariableValues> {
    let mut values = VariableValues::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Expected NAME=VALUE, got '{pair}'");
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("Variable name missing in '{pair}'");
        }
        values.insert(name.to_string(), value.to_string());
    }
    Ok(values)
}
