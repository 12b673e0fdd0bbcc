//! Conversion from crossterm events.
//!
//! Terminals report presses, drags and releases but never double-clicks, so this adapter never
//! yields [`MouseEventKind::DoubleClick`]. Apps that want one synthesize it from two quick
//! `Down` events on the same cell.

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;

pub fn input_event_from_crossterm(ev: crossterm::event::Event) -> Option<InputEvent> {
    match ev {
        crossterm::event::Event::Key(key) => {
            if key.kind != crossterm::event::KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key(key_event_from_crossterm(key)?))
        }
        crossterm::event::Event::Paste(s) => Some(InputEvent::Paste(s)),
        crossterm::event::Event::Mouse(m) => {
            Some(InputEvent::Mouse(mouse_event_from_crossterm(m)?))
        }
        crossterm::event::Event::Resize(width, height) => {
            Some(InputEvent::Resize { width, height })
        }
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::KeyCode as C;

    let code = match key.code {
        C::Char(c) => KeyCode::Char(c),
        C::Enter => KeyCode::Enter,
        C::Backspace => KeyCode::Backspace,
        C::Delete => KeyCode::Delete,
        C::Tab => KeyCode::Tab,
        C::Esc => KeyCode::Esc,
        C::Left => KeyCode::Left,
        C::Right => KeyCode::Right,
        C::Up => KeyCode::Up,
        C::Down => KeyCode::Down,
        C::Home => KeyCode::Home,
        C::End => KeyCode::End,
        C::PageUp => KeyCode::PageUp,
        C::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers: modifiers_from_crossterm(key.modifiers),
    })
}

pub fn mouse_event_from_crossterm(m: crossterm::event::MouseEvent) -> Option<MouseEvent> {
    use crossterm::event::MouseEventKind as K;

    let kind = match m.kind {
        K::Down(b) => MouseEventKind::Down(mouse_button_from_crossterm(b)),
        K::Drag(b) => MouseEventKind::Drag(mouse_button_from_crossterm(b)),
        K::Up(b) => MouseEventKind::Up(mouse_button_from_crossterm(b)),
        K::ScrollUp => MouseEventKind::ScrollUp,
        K::ScrollDown => MouseEventKind::ScrollDown,
        _ => return None,
    };

    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: modifiers_from_crossterm(m.modifiers),
    })
}

fn modifiers_from_crossterm(m: crossterm::event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: m.contains(crossterm::event::KeyModifiers::SHIFT),
        ctrl: m.contains(crossterm::event::KeyModifiers::CONTROL),
        alt: m.contains(crossterm::event::KeyModifiers::ALT),
    }
}

fn mouse_button_from_crossterm(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_maps_to_input_resize() {
        let ev = crossterm::event::Event::Resize(120, 40);
        assert_eq!(
            input_event_from_crossterm(ev),
            Some(InputEvent::Resize {
                width: 120,
                height: 40
            })
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        );
        key.kind = crossterm::event::KeyEventKind::Release;
        assert_eq!(
            input_event_from_crossterm(crossterm::event::Event::Key(key)),
            None
        );
    }
}
