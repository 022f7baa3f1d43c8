//! Key event naming
//!
//! Turns crossterm key events into the names used by `[keybindings]` in the
//! config file, e.g. `right`, `space`, `ctrl+c`, `G`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Config-file name for a key press, or `None` for keys slate never binds
pub fn key_name(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(format!("ctrl+{}", c.to_ascii_lowercase()));
            }
            if key.modifiers.contains(KeyModifiers::ALT) {
                return Some(format!("alt+{c}"));
            }
            // Shift is already folded into the character
            return Some(c.to_string());
        }
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "shift+tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        Some(format!("ctrl+{base}"))
    } else {
        Some(base)
    }
}
