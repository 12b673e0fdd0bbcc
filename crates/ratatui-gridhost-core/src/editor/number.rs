use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::CellEditor;
use super::EditorEvent;
use super::EditorProps;
use super::edit_text;
use crate::column::Align;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::theme::Theme;
use crate::value::CellValue;

/// Numeric stepper.
///
/// Each change is pushed as a provisional update and Enter commits. Leaving the control (blur or
/// Esc) ends the edit. Typed input that is not a number yet (`-`, `.`, `1.`) is kept as provisional
/// text until it is.
#[derive(Clone, Debug)]
pub struct NumberEditor {
    pub step: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Default for NumberEditor {
    fn default() -> Self {
        Self {
            step: 1.0,
            min: None,
            max: None,
        }
    }
}

impl NumberEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn clamp(&self, n: f64) -> f64 {
        let n = self.min.map_or(n, |m| n.max(m));
        self.max.map_or(n, |m| n.min(m))
    }
}

impl CellEditor for NumberEditor {
    fn name(&self) -> &'static str {
        "number"
    }

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent) {
        match event {
            EditorEvent::Change(value) => {
                let value = match value {
                    CellValue::Number(n) => CellValue::Number(self.clamp(n)),
                    other => other,
                };
                props.update(value, true);
            }
            EditorEvent::KeyUp(key) if key.is_enter() => {
                let value = match props.value() {
                    CellValue::Number(n) => CellValue::Number(*n),
                    CellValue::Text(text) => text
                        .trim()
                        .parse()
                        .map_or(CellValue::Empty, |n| CellValue::Number(self.clamp(n))),
                    other => other.clone(),
                };
                props.update(value, false);
            }
            EditorEvent::Blur => props.cancel(),
            _ => {}
        }
    }

    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        let current = props.value().as_number();
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                let delta = if key.code == KeyCode::Up {
                    self.step
                } else {
                    -self.step
                };
                let next = current.unwrap_or(0.0) + delta;
                self.on_event(props, EditorEvent::Change(CellValue::Number(next)));
            }
            KeyCode::Enter => self.on_event(props, EditorEvent::KeyUp(key.clone())),
            KeyCode::Esc => self.on_event(props, EditorEvent::Blur),
            _ => {
                let text = props.value().to_string();
                let Some(next) = edit_text(&text, key) else {
                    return;
                };
                if let Some(value) = typed_value(next) {
                    self.on_event(props, EditorEvent::Change(value));
                }
            }
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        render::fill(area, buf, theme.editing_cell);
        let text = format!("{value} ↕");
        render::render_str_aligned(area, buf, &text, Align::Right, theme.editing_cell);
    }
}

/// The value for typed text: a number when it reads back unchanged, provisional text while it is
/// still a number being typed, `None` when it can never become one.
fn typed_value(text: String) -> Option<CellValue> {
    if text.is_empty() {
        return Some(CellValue::Empty);
    }
    if let Ok(n) = text.parse::<f64>() {
        let number = CellValue::Number(n);
        if number.to_string() == text {
            return Some(number);
        }
    }
    is_numeric_prefix(&text).then_some(CellValue::Text(text))
}

/// An optional leading `-`, digits, and at most one `.`.
fn is_numeric_prefix(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut dots = 0;
    digits.chars().all(|c| match c {
        '.' => {
            dots += 1;
            dots == 1
        }
        c => c.is_ascii_digit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::testing::Call;
    use crate::editor::testing::event;
    use crate::editor::testing::key;
    use crate::keymap;

    #[test]
    fn change_is_provisional() {
        let calls = event(
            &NumberEditor::new(),
            CellValue::Number(1.0),
            EditorEvent::Change(CellValue::Number(5.0)),
        );
        assert_eq!(calls, vec![Call::Update(CellValue::Number(5.0), true)]);
    }

    #[test]
    fn enter_commits_and_blur_cancels() {
        let ed = NumberEditor::new();
        let calls = key(&ed, CellValue::Number(7.0), keymap::key(KeyCode::Enter));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(7.0), false)]);

        let calls = event(&ed, CellValue::Number(7.0), EditorEvent::Blur);
        assert_eq!(calls, vec![Call::Cancel]);
    }

    #[test]
    fn arrows_step_within_range() {
        let ed = NumberEditor::new().with_step(1000.0).with_range(0.0, 1500.0);
        let calls = key(&ed, CellValue::Number(900.0), keymap::key(KeyCode::Up));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(1500.0), true)]);
        let calls = key(&ed, CellValue::Number(900.0), keymap::key(KeyCode::Down));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(0.0), true)]);
    }

    #[test]
    fn digits_edit_the_number() {
        let ed = NumberEditor::new();
        let calls = key(&ed, CellValue::Number(12.0), keymap::key_char('3'));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(123.0), true)]);
        let calls = key(&ed, CellValue::Number(12.0), keymap::key_char('x'));
        assert!(calls.is_empty());
    }

    #[test]
    fn sign_and_point_start_a_number_in_an_empty_cell() {
        let ed = NumberEditor::new();
        let calls = key(&ed, CellValue::Empty, keymap::key_char('-'));
        assert_eq!(calls, vec![Call::Update(CellValue::text("-"), true)]);
        let calls = key(&ed, CellValue::text("-"), keymap::key_char('5'));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(-5.0), true)]);

        let calls = key(&ed, CellValue::Empty, keymap::key_char('.'));
        assert_eq!(calls, vec![Call::Update(CellValue::text("."), true)]);
        let calls = key(&ed, CellValue::Number(1.0), keymap::key_char('.'));
        assert_eq!(calls, vec![Call::Update(CellValue::text("1."), true)]);
        let calls = key(&ed, CellValue::text("1."), keymap::key_char('5'));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(1.5), true)]);

        let calls = key(&ed, CellValue::text("1."), keymap::key_char('.'));
        assert!(calls.is_empty());
    }

    #[test]
    fn enter_on_unfinished_input_commits_empty() {
        let ed = NumberEditor::new();
        let calls = key(&ed, CellValue::text("-"), keymap::key(KeyCode::Enter));
        assert_eq!(calls, vec![Call::Update(CellValue::Empty, false)]);
        let calls = key(&ed, CellValue::text("2."), keymap::key(KeyCode::Enter));
        assert_eq!(calls, vec![Call::Update(CellValue::Number(2.0), false)]);
    }
}
