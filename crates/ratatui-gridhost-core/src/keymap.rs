use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named set of keys, with the text shown for it in a help line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

/// Joins bindings into a single `key desc • key desc` help line.
pub fn help_line(bindings: &[Binding]) -> String {
    bindings
        .iter()
        .map(|b| format!("{} {}", b.help_key, b.help_desc))
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("a", "add row", vec![key_char('a')]);
        assert!(b.matches(&key_char('a')));
        assert!(!b.matches(&key_ctrl('a')));
    }

    #[test]
    fn help_line_joins_bindings() {
        let line = help_line(&[
            Binding::new("a", "add", vec![key_char('a')]),
            Binding::new("d", "remove", vec![key_char('d')]),
        ]);
        assert_eq!(line, "a add • d remove");
    }
}
