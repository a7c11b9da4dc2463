//! `{{variable}}` placeholder handling for prompt templates.
//!
//! This module provides the pure half of the palette:
//! - Extraction of the unique variable names a template references
//! - Rendering of a template against the values typed so far

mod parser;
mod render;

pub use parser::{extract, has_variables};
pub use render::{VariableValues, render};
