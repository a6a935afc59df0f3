use std::fmt;

/// Physical key, as far as the game cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable key, stored lowercase.
    Char(char),
    Escape,
    Enter,
}

impl KeyCode {
    /// Parses a key name from the configuration: a single character, or
    /// `Escape`/`Esc`, `Enter`/`Return` (case-insensitive).
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        let mut chars = label.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return (!c.is_whitespace()).then(|| KeyCode::Char(c.to_ascii_lowercase()));
        }
        match label.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Some(KeyCode::Escape),
            "enter" | "return" => Some(KeyCode::Enter),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Enter => write!(f, "Enter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub is_down: bool,
    /// Auto-repeat generated by a held key.
    pub is_repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Window closed or the host asked the game to exit.
    Quit,
}

impl InputEvent {
    pub fn key_down(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent {
            code,
            is_down: true,
            is_repeat: false,
        })
    }

    pub fn key_up(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent {
            code,
            is_down: false,
            is_repeat: false,
        })
    }

    pub fn key_repeat(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent {
            code,
            is_down: true,
            is_repeat: true,
        })
    }
}
