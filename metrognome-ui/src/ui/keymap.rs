use super::action_id::ActionId;
use super::{InputEvent, KeyCode};

/// A key (plus modifiers) that a binding responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// A printable character. Shift is allowed since it is part of the
    /// character (`?`, `P`); Ctrl and Alt are not.
    Char(char),
    /// A named key with no modifiers.
    Key(KeyCode),
    Ctrl(char),
    Alt(char),
    CtrlKey(KeyCode),
    ShiftKey(KeyCode),
}

impl KeyPattern {
    pub fn matches(&self, event: &InputEvent) -> bool {
        let m = event.modifiers;
        match *self {
            KeyPattern::Char(c) => event.key == KeyCode::Char(c) && !m.ctrl && !m.alt,
            KeyPattern::Key(k) => event.key == k && !m.ctrl && !m.alt && !m.shift,
            KeyPattern::Ctrl(c) => {
                m.ctrl && !m.alt && event.key == KeyCode::Char(c.to_ascii_lowercase())
            }
            KeyPattern::Alt(c) => m.alt && !m.ctrl && event.key == KeyCode::Char(c),
            KeyPattern::CtrlKey(k) => m.ctrl && !m.alt && event.key == k,
            KeyPattern::ShiftKey(k) => m.shift && !m.ctrl && !m.alt && event.key == k,
        }
    }

    /// Human-readable notation, as shown in the help overlay.
    pub fn display(&self) -> String {
        match *self {
            KeyPattern::Char(' ') => "Space".to_string(),
            KeyPattern::Char(c) => c.to_string(),
            KeyPattern::Key(k) => key_name(k),
            KeyPattern::Ctrl(c) => format!("Ctrl+{}", c),
            KeyPattern::Alt(c) => format!("Alt+{}", c),
            KeyPattern::CtrlKey(k) => format!("Ctrl+{}", key_name(k)),
            KeyPattern::ShiftKey(k) => format!("Shift+{}", key_name(k)),
        }
    }
}

fn key_name(key: KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Escape => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{}", n),
    }
}

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub pattern: KeyPattern,
    pub action: ActionId,
    pub description: &'static str,
}

/// Ordered list of bindings; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// Builder: bind a plain character.
    #[cfg(test)]
    pub fn bind(mut self, ch: char, action: ActionId, description: &'static str) -> Self {
        self.bindings.push(KeyBinding {
            pattern: KeyPattern::Char(ch),
            action,
            description,
        });
        self
    }

    /// Builder: bind a named key.
    #[cfg(test)]
    pub fn bind_key(mut self, key: KeyCode, action: ActionId, description: &'static str) -> Self {
        self.bindings.push(KeyBinding {
            pattern: KeyPattern::Key(key),
            action,
            description,
        });
        self
    }

    pub fn lookup(&self, event: &InputEvent) -> Option<ActionId> {
        self.bindings
            .iter()
            .find(|b| b.pattern.matches(event))
            .map(|b| b.action)
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}
