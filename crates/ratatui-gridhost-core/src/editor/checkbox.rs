use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::CellEditor;
use super::EditorEvent;
use super::EditorProps;
use crate::column::Align;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::theme::Theme;
use crate::value::CellValue;

/// Boolean toggle; every change commits immediately.
#[derive(Clone, Debug)]
pub struct CheckboxEditor {
    pub label: String,
}

impl Default for CheckboxEditor {
    fn default() -> Self {
        Self {
            label: "Active".to_string(),
        }
    }
}

impl CheckboxEditor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl CellEditor for CheckboxEditor {
    fn name(&self) -> &'static str {
        "checkbox"
    }

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent) {
        if let EditorEvent::Change(value) = event {
            let checked = value.as_bool().unwrap_or(false);
            props.update(CellValue::Bool(checked), false);
        }
    }

    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                let checked = props.value().as_bool().unwrap_or(false);
                self.on_event(props, EditorEvent::Change(CellValue::Bool(!checked)));
            }
            KeyCode::Esc => props.cancel(),
            _ => {}
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        render::fill(area, buf, theme.editing_cell);
        let mark = if value.as_bool().unwrap_or(false) {
            "[x]"
        } else {
            "[ ]"
        };
        let text = format!("{mark} {}", self.label);
        render::render_str_aligned(area, buf, &text, Align::Center, theme.editing_cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::testing::Call;
    use crate::editor::testing::event;
    use crate::editor::testing::key;
    use crate::editor::testing::rendered;
    use crate::keymap;

    #[test]
    fn toggle_commits_immediately() {
        let ed = CheckboxEditor::default();
        assert_eq!(
            key(&ed, CellValue::Bool(true), keymap::key_char(' ')),
            vec![Call::Update(CellValue::Bool(false), false)]
        );
        assert_eq!(
            key(&ed, CellValue::Empty, keymap::key(KeyCode::Enter)),
            vec![Call::Update(CellValue::Bool(true), false)]
        );
        assert_eq!(
            event(&ed, CellValue::Bool(false), EditorEvent::Change(CellValue::Bool(true))),
            vec![Call::Update(CellValue::Bool(true), false)]
        );
    }

    #[test]
    fn renders_mark_and_label() {
        let ed = CheckboxEditor::default();
        assert_eq!(rendered(&ed, &CellValue::Bool(true), 10), "[x] Active");
    }
}
