use std::fmt;
use std::rc::Rc;

use crate::editor::CellEditor;
use crate::editor::TextEditor;
use crate::value::CellValue;
use crate::value::Formatter;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// When a column's editor opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// Opens as soon as the cell is focused.
    Always,
    /// Opens on Enter or double-click.
    #[default]
    OnActivate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinEditor {
    Text,
}

#[derive(Clone)]
pub enum EditorRender {
    Builtin(BuiltinEditor),
    Custom(Rc<dyn CellEditor>),
}

impl fmt::Debug for EditorRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(b) => f.debug_tuple("Builtin").field(b).finish(),
            Self::Custom(e) => f.debug_tuple("Custom").field(&e.name()).finish(),
        }
    }
}

/// How and when a column's cells become editable.
#[derive(Clone, Debug)]
pub struct EditorSpec {
    pub activation: Activation,
    pub render: EditorRender,
    /// Width of the editor control; defaults to the column width.
    pub width: Option<u16>,
}

impl EditorSpec {
    pub fn builtin(editor: BuiltinEditor) -> Self {
        Self {
            activation: Activation::OnActivate,
            render: EditorRender::Builtin(editor),
            width: None,
        }
    }

    pub fn text() -> Self {
        Self::builtin(BuiltinEditor::Text)
    }

    pub fn custom(editor: impl CellEditor + 'static) -> Self {
        Self {
            activation: Activation::OnActivate,
            render: EditorRender::Custom(Rc::new(editor)),
            width: None,
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn always(self) -> Self {
        self.with_activation(Activation::Always)
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Resolves the editor implementation for this spec.
    pub fn editor(&self) -> Rc<dyn CellEditor> {
        match &self.render {
            EditorRender::Builtin(BuiltinEditor::Text) => Rc::new(TextEditor),
            EditorRender::Custom(e) => e.clone(),
        }
    }
}

/// Static description of one grid column.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub width: Option<u16>,
    pub formatter: Option<Formatter>,
    pub align: Option<Align>,
    pub editor: Option<EditorSpec>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
            formatter: None,
            align: None,
            editor: None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn editor(mut self, editor: EditorSpec) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn is_editable(&self) -> bool {
        self.editor.is_some()
    }

    pub fn display(&self, value: &CellValue) -> String {
        match self.formatter {
            Some(f) => f.format(value),
            None => value.to_string(),
        }
    }
}

/// Index of the first column carrying an editor.
pub fn first_editable(columns: &[ColumnSpec]) -> Option<usize> {
    columns.iter().position(ColumnSpec::is_editable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_text_resolves_to_text_editor() {
        let spec = EditorSpec::text();
        assert_eq!(spec.activation, Activation::OnActivate);
        assert_eq!(spec.editor().name(), "text");
    }

    #[test]
    fn first_editable_skips_read_only_columns() {
        let cols = vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("title", "Title").editor(EditorSpec::text()),
        ];
        assert_eq!(first_editable(&cols), Some(1));
        assert_eq!(first_editable(&cols[..1]), None);
    }

    #[test]
    fn display_applies_formatter() {
        let col = ColumnSpec::new("money", "Money").formatter(Formatter::Money);
        assert_eq!(col.display(&CellValue::Number(18000.0)), "18,000");
        assert_eq!(ColumnSpec::new("n", "N").display(&CellValue::Number(3.0)), "3");
    }
}
