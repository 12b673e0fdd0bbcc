use chrono::Days;
use chrono::Local;
use chrono::Months;
use chrono::NaiveDate;
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
use crate::value::DATE_FORMAT;

/// Date picker over `%Y/%m/%d` text values.
///
/// Picking a date commits it as formatted text. An empty or unparseable value opens on today.
#[derive(Clone, Debug)]
pub struct DateEditor {
    today: fn() -> NaiveDate,
}

impl Default for DateEditor {
    fn default() -> Self {
        Self {
            today: local_today,
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl DateEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the clock used for empty values.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// The date the picker shows for `value`.
    pub fn picked(&self, value: &CellValue) -> NaiveDate {
        if value.is_empty() {
            return (self.today)();
        }
        value.as_date().unwrap_or_else(|| (self.today)())
    }

    fn shifted(&self, value: &CellValue, key: &KeyCode) -> Option<NaiveDate> {
        let d = self.picked(value);
        match key {
            KeyCode::Up | KeyCode::Char('+') => d.checked_add_days(Days::new(1)),
            KeyCode::Down | KeyCode::Char('-') => d.checked_sub_days(Days::new(1)),
            KeyCode::PageUp => d.checked_add_months(Months::new(1)),
            KeyCode::PageDown => d.checked_sub_months(Months::new(1)),
            KeyCode::Char('t') => Some((self.today)()),
            _ => None,
        }
    }
}

impl CellEditor for DateEditor {
    fn name(&self) -> &'static str {
        "date"
    }

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent) {
        if let EditorEvent::Change(value) = event {
            let formatted = match value.as_date() {
                Some(d) => d.format(DATE_FORMAT).to_string(),
                None => value.to_string(),
            };
            props.update(CellValue::Text(formatted), false);
        }
    }

    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let d = self.picked(props.value());
                self.on_event(props, EditorEvent::Change(CellValue::Date(d)));
            }
            KeyCode::Esc => props.cancel(),
            ref code => {
                if let Some(d) = self.shifted(props.value(), code) {
                    self.on_event(props, EditorEvent::Change(CellValue::Date(d)));
                }
            }
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        render::fill(area, buf, theme.editing_cell);
        let text = self.picked(value).format(DATE_FORMAT).to_string();
        render::render_str_aligned(area, buf, &text, Align::Left, theme.editing_cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::testing::Call;
    use crate::editor::testing::event;
    use crate::editor::testing::key;
    use crate::keymap;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    fn editor() -> DateEditor {
        DateEditor::new().with_today(fixed_today)
    }

    #[test]
    fn parses_value_or_falls_back_to_today() {
        let ed = editor();
        assert_eq!(
            ed.picked(&CellValue::text("2017/12/05")),
            NaiveDate::from_ymd_opt(2017, 12, 5).unwrap()
        );
        assert_eq!(ed.picked(&CellValue::text("")), fixed_today());
        assert_eq!(ed.picked(&CellValue::Empty), fixed_today());
        assert_eq!(ed.picked(&CellValue::text("12-05-2017")), fixed_today());
    }

    #[test]
    fn change_commits_formatted_text() {
        let d = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(
            event(&editor(), CellValue::Empty, EditorEvent::Change(CellValue::Date(d))),
            vec![Call::Update(CellValue::text("2018/01/01"), false)]
        );
    }

    #[test]
    fn keys_move_the_date() {
        let ed = editor();
        assert_eq!(
            key(&ed, CellValue::text("2017/12/31"), keymap::key(KeyCode::Up)),
            vec![Call::Update(CellValue::text("2018/01/01"), false)]
        );
        assert_eq!(
            key(&ed, CellValue::text("2024/03/31"), keymap::key(KeyCode::PageDown)),
            vec![Call::Update(CellValue::text("2024/02/29"), false)]
        );
        assert_eq!(
            key(&ed, CellValue::Empty, keymap::key(KeyCode::Enter)),
            vec![Call::Update(CellValue::text("2024/02/29"), false)]
        );
    }
}
