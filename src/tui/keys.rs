use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::palette::Key;

/// Translate a crossterm key event into a palette key.
///
/// Releases and repeats reported by enhanced keyboard protocols are dropped,
/// as are keys the palette has no binding for.
pub fn translate(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    match event {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers,
            ..
        } if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Ctrl(c.to_ascii_lowercase())),
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => Some(Key::Char(c)),
        KeyEvent {
            code: KeyCode::Tab,
            modifiers: KeyModifiers::SHIFT,
            ..
        } => Some(Key::BackTab),
        KeyEvent {
            code: KeyCode::Tab, ..
        } => Some(Key::Tab),
        KeyEvent {
            code: KeyCode::BackTab,
            ..
        } => Some(Key::BackTab),
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => Some(Key::Backspace),
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => Some(Key::Enter),
        KeyEvent {
            code: KeyCode::Esc, ..
        } => Some(Key::Esc),
        KeyEvent {
            code: KeyCode::Up, ..
        } => Some(Key::Up),
        KeyEvent {
            code: KeyCode::Down,
            ..
        } => Some(Key::Down),
        _ => None,
    }
}
