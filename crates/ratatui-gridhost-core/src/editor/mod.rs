//! Cell editors.
//!
//! An editor is a stateless object: everything it needs arrives in [`EditorProps`] (the current
//! value plus the `update`/`cancel`/`focus`/`blur` callbacks of the edit session), and everything
//! it produces goes back out through those callbacks. Editors react to two kinds of input:
//!
//! - [`EditorEvent`]s: control-level events such as "value changed" or "dropdown closed";
//! - raw terminal keys via [`CellEditor::on_key`], which each editor translates into control
//!   events.
//!
//! `update(value, true)` stores a provisional value and keeps the cell in edit mode;
//! `update(value, false)` commits and leaves edit mode.

use std::fmt;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::theme::Theme;
use crate::value::CellValue;

mod checkbox;
mod date;
mod number;
mod select;
mod text;

pub use checkbox::CheckboxEditor;
pub use date::DateEditor;
pub use number::NumberEditor;
pub use select::SearchSelectEditor;
pub use select::SelectEditor;
pub use select::SelectOption;
pub use text::TextEditor;

/// Callbacks an edit session exposes to its editor.
pub trait EditHandle {
    fn update(&mut self, value: CellValue, keep_editing: bool);
    fn cancel(&mut self);
    fn focus(&mut self);
    fn blur(&mut self);
}

/// What an editor is rendered and driven with.
pub struct EditorProps<'a> {
    value: CellValue,
    handle: &'a mut dyn EditHandle,
}

impl<'a> EditorProps<'a> {
    pub fn new(value: CellValue, handle: &'a mut dyn EditHandle) -> Self {
        Self { value, handle }
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn update(&mut self, value: CellValue, keep_editing: bool) {
        if keep_editing {
            self.value = value.clone();
        }
        self.handle.update(value, keep_editing);
    }

    pub fn cancel(&mut self) {
        self.handle.cancel();
    }

    pub fn focus(&mut self) {
        self.handle.focus();
    }

    pub fn blur(&mut self) {
        self.handle.blur();
    }
}

impl fmt::Debug for EditorProps<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Control-level events delivered to an editor.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// The control's value changed (stepper moved, option picked, date chosen, box toggled).
    Change(CellValue),
    /// A key was released on the control.
    KeyUp(KeyEvent),
    /// A key was pressed inside a search box; `text` is the box content after the key.
    InputKey { key: KeyEvent, text: String },
    Focus,
    Blur,
    /// A dropdown opened (`true`) or closed (`false`).
    DropdownVisible(bool),
}

/// A cell editor. Implementations must not keep per-edit state.
pub trait CellEditor {
    /// Short identifier used in logs and debug output.
    fn name(&self) -> &'static str;

    fn on_event(&self, props: &mut EditorProps<'_>, event: EditorEvent);

    /// Translates a terminal key into control events.
    ///
    /// The default commits the current value on Enter and cancels on Esc.
    fn on_key(&self, props: &mut EditorProps<'_>, key: &KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let value = props.value().clone();
                props.update(value, false);
            }
            KeyCode::Esc => props.cancel(),
            _ => {}
        }
    }

    fn render(&self, value: &CellValue, area: Rect, buf: &mut Buffer, theme: &Theme);
}

/// Applies a text-editing key (`Char`/`Backspace`) to `text`. Returns `None` for other keys.
pub(crate) fn edit_text(text: &str, key: &KeyEvent) -> Option<String> {
    if key.modifiers.ctrl || key.modifiers.alt {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => {
            let mut out = text.to_string();
            out.push(c);
            Some(out)
        }
        KeyCode::Backspace => {
            let mut out = text.to_string();
            out.pop();
            Some(out)
        }
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every callback an editor makes.
    #[derive(Debug, Default, PartialEq)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        Update(CellValue, bool),
        Cancel,
        Focus,
        Blur,
    }

    impl EditHandle for Recorder {
        fn update(&mut self, value: CellValue, keep_editing: bool) {
            self.calls.push(Call::Update(value, keep_editing));
        }

        fn cancel(&mut self) {
            self.calls.push(Call::Cancel);
        }

        fn focus(&mut self) {
            self.calls.push(Call::Focus);
        }

        fn blur(&mut self) {
            self.calls.push(Call::Blur);
        }
    }

    pub fn event(editor: &dyn CellEditor, value: CellValue, ev: EditorEvent) -> Vec<Call> {
        let mut rec = Recorder::default();
        let mut props = EditorProps::new(value, &mut rec);
        editor.on_event(&mut props, ev);
        rec.calls
    }

    pub fn key(editor: &dyn CellEditor, value: CellValue, key: KeyEvent) -> Vec<Call> {
        let mut rec = Recorder::default();
        let mut props = EditorProps::new(value, &mut rec);
        editor.on_key(&mut props, &key);
        rec.calls
    }

    pub fn rendered(editor: &dyn CellEditor, value: &CellValue, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        editor.render(value, area, &mut buf, &Theme::default());
        (0..width)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}
