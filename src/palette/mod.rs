//! The command palette: search, variable filling and prompt editing.
//!
//! [`Palette`] is a synchronous state machine driven by keys and collaborator
//! completions. [`PaletteController`] wires it to a [`crate::store::RecordStore`],
//! a [`crate::clipboard::ClipboardWriter`] and a [`crate::confirm::Confirmer`].

mod controller;
mod editor;
mod filter;
mod machine;
mod types;
mod viewport;

pub use controller::PaletteController;
pub use editor::{EditorBuffer, EditorField};
pub use filter::matches;
pub use machine::Palette;
pub use types::{Effect, Key, Mode, NoticeLevel};
pub use viewport::Viewport;

#[cfg(test)]
mod tests;
