//! The "inline edit" sample page: seven columns, one of each editor, and six rows.

use chrono::Local;
use chrono::NaiveDate;

use ratatui_gridhost_core::column::Align;
use ratatui_gridhost_core::column::ColumnSpec;
use ratatui_gridhost_core::column::EditorSpec;
use ratatui_gridhost_core::editor::CheckboxEditor;
use ratatui_gridhost_core::editor::DateEditor;
use ratatui_gridhost_core::editor::NumberEditor;
use ratatui_gridhost_core::editor::SearchSelectEditor;
use ratatui_gridhost_core::editor::SelectEditor;
use ratatui_gridhost_core::value::CellValue;
use ratatui_gridhost_core::value::Formatter;
use ratatui_gridhost_core::value::Row;

use crate::error::Result;
use crate::host::GridHost;
use crate::options::GridHostOptions;

const QUOTE_ACTION: &str = "Think like a man of action and act like man of thought.";
const QUOTE_COURAGE: &str = "Courage is very important. Like a muscle, it is strengthened by use.";

#[derive(Clone, Debug)]
pub struct InlineEditPage {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Row>,
    pub new_row: Row,
}

impl InlineEditPage {
    pub fn into_host(self, options: GridHostOptions) -> Result<GridHost> {
        GridHost::with_options(self.columns, self.rows, self.new_row, options)
    }
}

/// The sample page dated today.
pub fn inline_edit_page() -> InlineEditPage {
    inline_edit_page_on(Local::now().date_naive())
}

/// The sample page with `today` standing in for "now" in the date column.
pub fn inline_edit_page_on(today: NaiveDate) -> InlineEditPage {
    InlineEditPage {
        columns: columns(),
        rows: (0..2).flat_map(|_| sample_rows(today)).enumerate().map(renumber).collect(),
        new_row: Row::new()
            .with("id", 999i64)
            .with("title", "")
            .with("writer", "")
            .with("date", "")
            .with("money", 0i64)
            .with("type", "B")
            .with("check", true),
    }
}

pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", "ID").width(4).editor(EditorSpec::text()),
        ColumnSpec::new("title", "Title").width(24).editor(EditorSpec::text()),
        ColumnSpec::new("date", "Date")
            .width(10)
            .formatter(Formatter::Date)
            .editor(EditorSpec::custom(DateEditor::new()).always().with_width(10)),
        ColumnSpec::new("type", "select")
            .width(8)
            .editor(EditorSpec::custom(SelectEditor::from_values(["A", "B", "C"])).always()),
        ColumnSpec::new("writer", "search").width(10).editor(
            EditorSpec::custom(SearchSelectEditor::from_values(["Jack", "Sofia", "Thomas"]))
                .always(),
        ),
        ColumnSpec::new("money", "Money")
            .width(10)
            .formatter(Formatter::Money)
            .align(Align::Right)
            .editor(EditorSpec::custom(NumberEditor::new())),
        ColumnSpec::new("check", "checkbox")
            .width(12)
            .editor(EditorSpec::custom(CheckboxEditor::default()).always()),
    ]
}

fn sample_rows(today: NaiveDate) -> [Row; 3] {
    [
        Row::new()
            .with("title", QUOTE_ACTION)
            .with("writer", "Thomas")
            .with("date", "2017/12/05")
            .with("money", 120_000i64)
            .with("type", "A")
            .with("check", true),
        Row::new()
            .with("title", QUOTE_COURAGE)
            .with("writer", "Sofia")
            .with("date", CellValue::Date(today))
            .with("money", 18_000i64)
            .with("type", "B")
            .with("check", false),
        Row::new()
            .with("title", "TEST")
            .with("writer", "Jack")
            .with("date", "2018/01/01")
            .with("money", 9_000i64)
            .with("type", "C")
            .with("check", false),
    ]
}

fn renumber((index, row): (usize, Row)) -> Row {
    row.with("id", index as i64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui_gridhost_core::column::Activation;
    use ratatui_gridhost_core::column::first_editable;

    #[test]
    fn sample_page_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let page = inline_edit_page_on(today);
        assert_eq!(page.columns.len(), 7);
        assert_eq!(page.rows.len(), 6);
        assert_eq!(page.rows[5].get("id"), &CellValue::Number(6.0));
        assert_eq!(page.rows[4].get("date"), &CellValue::Date(today));
        assert_eq!(first_editable(&page.columns), Some(0));

        let always: Vec<&str> = page
            .columns
            .iter()
            .filter(|c| c.editor.as_ref().is_some_and(|e| e.activation == Activation::Always))
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(always, ["date", "type", "writer", "check"]);
    }

    #[test]
    fn formatted_cells() {
        let page = inline_edit_page_on(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let money = &page.columns[5];
        assert_eq!(money.display(page.rows[0].get("money")), "120,000");
        let date = &page.columns[2];
        assert_eq!(date.display(page.rows[1].get("date")), "2024/03/09");
    }
}
