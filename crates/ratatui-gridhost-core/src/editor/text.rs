use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use super::CellEditor;
use super::EditorEvent;
use super::EditorProps;
use super::edit_text;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::theme::Theme;
use crate::value::CellValue;

/// The built-in single-line text editor.
///
/// Every keystroke is a provisional update; Enter commits, Esc or blur cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextEditor;

impl CellEditor for TextEditor {
    fn name(&self) -> &'static str {
        "text"
    }

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent) {
        match event {
            EditorEvent::Change(value) => props.update(value, true),
            EditorEvent::KeyUp(key) if key.is_enter() => {
                let value = props.value().clone();
                props.update(value, false);
            }
            EditorEvent::Blur => props.cancel(),
            _ => {}
        }
    }

    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        match key.code {
            KeyCode::Esc => props.cancel(),
            KeyCode::Enter => self.on_event(props, EditorEvent::KeyUp(key.clone())),
            _ => {
                let current = props.value().to_string();
                if let Some(next) = edit_text(&current, key) {
                    self.on_event(props, EditorEvent::Change(CellValue::Text(next)));
                }
            }
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        render::fill(area, buf, theme.editing_cell);
        let text = value.to_string();
        // keep the caret end of long input visible
        let w = UnicodeWidthStr::width(text.as_str()) as u32;
        let start = w.saturating_sub(area.width.saturating_sub(1) as u32);
        render::render_str_clipped(
            area.x,
            area.y,
            start,
            area.width,
            buf,
            &text,
            theme.editing_cell,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::testing::Call;
    use crate::editor::testing::key;
    use crate::editor::testing::rendered;
    use crate::keymap;

    #[test]
    fn typing_is_provisional_and_enter_commits() {
        let calls = key(&TextEditor, CellValue::text("ab"), keymap::key_char('c'));
        assert_eq!(calls, vec![Call::Update(CellValue::text("abc"), true)]);

        let calls = key(&TextEditor, CellValue::text("ab"), keymap::key(KeyCode::Enter));
        assert_eq!(calls, vec![Call::Update(CellValue::text("ab"), false)]);

        let calls = key(&TextEditor, CellValue::text("ab"), keymap::key(KeyCode::Esc));
        assert_eq!(calls, vec![Call::Cancel]);
    }

    #[test]
    fn long_text_shows_its_tail() {
        assert_eq!(rendered(&TextEditor, &CellValue::text("abcdefgh"), 4), "fgh");
    }
}
