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

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

fn options_from<I, S>(values: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(SelectOption::plain).collect()
}

/// Dropdown visibility is mirrored into the grid's focus tracking.
fn dropdown_visible(props: &mut EditorProps<'_>, open: bool) {
    if open {
        props.focus();
    } else {
        props.blur();
    }
}

fn render_dropdown(text: &str, area: Rect, buf: &mut Buffer, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    render::fill(area, buf, theme.editing_cell);
    render::render_str_clipped(
        area.x,
        area.y,
        0,
        area.width.saturating_sub(2),
        buf,
        text,
        theme.editing_cell,
    );
    render::render_str_aligned(area, buf, "▾", Align::Right, theme.editing_cell);
}

/// Plain dropdown. Picking an option commits it.
#[derive(Clone, Debug, Default)]
pub struct SelectEditor {
    pub options: Vec<SelectOption>,
}

impl SelectEditor {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(options_from(values))
    }

    fn step(&self, current: &CellValue, forward: bool) -> Option<&SelectOption> {
        if self.options.is_empty() {
            return None;
        }
        let current = current.to_string();
        let len = self.options.len();
        let next = match self.options.iter().position(|o| o.value == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.options.get(next)
    }
}

impl CellEditor for SelectEditor {
    fn name(&self) -> &'static str {
        "select"
    }

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent) {
        match event {
            EditorEvent::Change(value) => props.update(value, false),
            EditorEvent::DropdownVisible(open) => dropdown_visible(props, open),
            _ => {}
        }
    }

    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                let picked = self
                    .step(props.value(), key.code == KeyCode::Down)
                    .map(|o| CellValue::text(o.value.clone()));
                if let Some(value) = picked {
                    self.on_event(props, EditorEvent::Change(value));
                }
            }
            KeyCode::Char(' ') => self.on_event(props, EditorEvent::DropdownVisible(true)),
            KeyCode::Enter => {
                let value = props.value().clone();
                self.on_event(props, EditorEvent::Change(value));
            }
            KeyCode::Esc => {
                self.on_event(props, EditorEvent::DropdownVisible(false));
                props.cancel();
            }
            _ => {}
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let current = value.to_string();
        let label = self
            .options
            .iter()
            .find(|o| o.value == current)
            .map(|o| o.label.as_str())
            .unwrap_or(current.as_str());
        render_dropdown(label, area, buf, theme);
    }
}

/// Dropdown with a search box.
///
/// Typed text is pushed as a provisional value on every keystroke other than Enter/Esc; Enter
/// commits the first option matching the text (or the text itself when nothing matches).
#[derive(Clone, Debug, Default)]
pub struct SearchSelectEditor {
    pub options: Vec<SelectOption>,
}

impl SearchSelectEditor {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(options_from(values))
    }

    /// Options whose label contains `query`, ignoring case. An empty query matches all.
    pub fn matches(&self, query: &str) -> Vec<&SelectOption> {
        let query = query.to_lowercase();
        self.options
            .iter()
            .filter(|o| o.label.to_lowercase().contains(&query))
            .collect()
    }
}

impl CellEditor for SearchSelectEditor {
    fn name(&self) -> &'static str {
        "search-select"
    }

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent) {
        match event {
            EditorEvent::InputKey { key, text } => {
                if !key.is_enter() && !key.is_esc() {
                    props.update(CellValue::Text(text), true);
                }
            }
            EditorEvent::Change(value) => props.update(value, false),
            EditorEvent::Focus => props.focus(),
            EditorEvent::Blur => props.blur(),
            EditorEvent::DropdownVisible(open) => dropdown_visible(props, open),
            EditorEvent::KeyUp(_) => {}
        }
    }

    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let text = props.value().to_string();
                let picked = self
                    .matches(&text)
                    .first()
                    .map(|o| CellValue::text(o.value.clone()))
                    .unwrap_or_else(|| props.value().clone());
                self.on_event(props, EditorEvent::Change(picked));
            }
            KeyCode::Down => self.on_event(props, EditorEvent::DropdownVisible(true)),
            KeyCode::Esc => {
                self.on_event(props, EditorEvent::DropdownVisible(false));
                props.cancel();
            }
            _ => {
                let current = props.value().to_string();
                if let Some(text) = edit_text(&current, key) {
                    self.on_event(
                        props,
                        EditorEvent::InputKey {
                            key: key.clone(),
                            text,
                        },
                    );
                }
            }
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let text = value.to_string();
        let hits = self.matches(&text).len();
        render_dropdown(&format!("{text} ({hits})"), area, buf, theme);
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

    fn writers() -> SearchSelectEditor {
        SearchSelectEditor::from_values(["Jack", "Sofia", "Thomas"])
    }

    #[test]
    fn search_filters_case_insensitively() {
        let ed = writers();
        let hits: Vec<&str> = ed.matches("o").iter().map(|o| o.value.as_str()).collect();
        assert_eq!(hits, vec!["Sofia", "Thomas"]);
        assert_eq!(ed.matches("").len(), 3);
        assert!(ed.matches("zed").is_empty());
    }

    #[test]
    fn search_keystrokes_are_provisional() {
        let calls = key(&writers(), CellValue::text("So"), keymap::key_char('f'));
        assert_eq!(calls, vec![Call::Update(CellValue::text("Sof"), true)]);

        let enter = EditorEvent::InputKey {
            key: keymap::key(KeyCode::Enter),
            text: "Sof".to_string(),
        };
        assert!(event(&writers(), CellValue::text("So"), enter).is_empty());
    }

    #[test]
    fn search_enter_commits_first_match() {
        let calls = key(&writers(), CellValue::text("tho"), keymap::key(KeyCode::Enter));
        assert_eq!(calls, vec![Call::Update(CellValue::text("Thomas"), false)]);

        let calls = key(&writers(), CellValue::text("zed"), keymap::key(KeyCode::Enter));
        assert_eq!(calls, vec![Call::Update(CellValue::text("zed"), false)]);
    }

    #[test]
    fn dropdown_visibility_drives_focus() {
        let ed = writers();
        assert_eq!(
            event(&ed, CellValue::Empty, EditorEvent::DropdownVisible(true)),
            vec![Call::Focus]
        );
        assert_eq!(
            event(&ed, CellValue::Empty, EditorEvent::DropdownVisible(false)),
            vec![Call::Blur]
        );
        assert_eq!(
            key(&ed, CellValue::Empty, keymap::key(KeyCode::Esc)),
            vec![Call::Blur, Call::Cancel]
        );
    }

    #[test]
    fn select_commits_on_pick() {
        let ed = SelectEditor::from_values(["A", "B", "C"]);
        assert_eq!(
            event(&ed, CellValue::text("A"), EditorEvent::Change(CellValue::text("C"))),
            vec![Call::Update(CellValue::text("C"), false)]
        );
        assert_eq!(
            key(&ed, CellValue::text("C"), keymap::key(KeyCode::Down)),
            vec![Call::Update(CellValue::text("A"), false)]
        );
        assert_eq!(
            key(&ed, CellValue::text("A"), keymap::key(KeyCode::Up)),
            vec![Call::Update(CellValue::text("C"), false)]
        );
        assert_eq!(
            key(&ed, CellValue::text("A"), keymap::key_char(' ')),
            vec![Call::Focus]
        );
    }

    #[test]
    fn select_renders_label_and_marker() {
        let ed = SelectEditor::new(vec![SelectOption::new("B", "Bravo")]);
        assert_eq!(rendered(&ed, &CellValue::text("B"), 8), "Bravo  ▾");
    }
}
