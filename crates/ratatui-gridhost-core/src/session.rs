//! Edit-session contract between a grid and its cell editors.
//!
//! ```text
//! Idle --activate--> Editing --update(v, false)--> Idle   (final commit)
//!                       |  ^
//!                       |  +-- update(v, true)            (provisional commit, stays editing)
//!                       +----- cancel()          --> Idle (ends the edit)
//! ```
//!
//! Both kinds of update queue a [`Commit`]; the grid drains them with
//! [`EditSession::take_commits`] and writes them into its rows. `cancel()` only ends the edit, so
//! provisional values already taken stay in place.
//!
//! `Always` columns activate on focus; `OnActivate` columns need Enter or a double-click.
//! `focus()`/`blur()` only move the focus indicator and never change the edit state.

use crate::column::Activation;
use crate::column::EditorSpec;
use crate::editor::CellEditor;
use crate::editor::EditHandle;
use crate::editor::EditorEvent;
use crate::editor::EditorProps;
use crate::geometry::Cell;
use crate::input::KeyEvent;
use crate::value::CellValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationTrigger {
    /// The cell received focus (selection moved onto it).
    Focus,
    Enter,
    DoubleClick,
}

impl ActivationTrigger {
    /// Whether this trigger opens an editor with the given activation mode.
    pub fn opens(self, activation: Activation) -> bool {
        match activation {
            Activation::Always => true,
            Activation::OnActivate => {
                matches!(self, ActivationTrigger::Enter | ActivationTrigger::DoubleClick)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        cell: Cell,
        value: CellValue,
    },
}

/// A value the session committed for a cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit {
    pub cell: Cell,
    pub value: CellValue,
    /// `true` for `update(v, true)`: the edit is still open.
    pub provisional: bool,
}

#[derive(Debug, Default)]
pub struct EditSession {
    state: EditState,
    focused: bool,
    commits: Vec<Commit>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn cell(&self) -> Option<Cell> {
        match self.state {
            EditState::Editing { cell, .. } => Some(cell),
            EditState::Idle => None,
        }
    }

    pub fn value(&self) -> Option<&CellValue> {
        match &self.state {
            EditState::Editing { value, .. } => Some(value),
            EditState::Idle => None,
        }
    }

    /// Whether the editor currently holds the grid's focus indicator.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Opens an editor on `cell` if `trigger` satisfies the column's activation mode.
    ///
    /// Returns `false` (and leaves any running edit untouched) when it does not.
    pub fn activate(
        &mut self,
        cell: Cell,
        spec: &EditorSpec,
        trigger: ActivationTrigger,
        value: CellValue,
    ) -> bool {
        if !trigger.opens(spec.activation) {
            return false;
        }
        tracing::debug!(
            target: crate::targets::EDIT,
            row = cell.row,
            col = cell.col,
            ?trigger,
            "edit activated"
        );
        self.state = EditState::Editing { cell, value };
        self.focused = false;
        true
    }

    /// Ends any running edit without committing.
    pub fn reset(&mut self) {
        self.state = EditState::Idle;
        self.focused = false;
    }

    /// Drains queued commits, oldest first.
    pub fn take_commits(&mut self) -> Vec<Commit> {
        std::mem::take(&mut self.commits)
    }

    pub fn dispatch_key(&mut self, editor: &dyn CellEditor, key: &KeyEvent) {
        let Some(value) = self.value().cloned() else {
            return;
        };
        let mut props = EditorProps::new(value, self);
        editor.on_key(&mut props, key);
    }

    pub fn dispatch_event(&mut self, editor: &dyn CellEditor, event: EditorEvent) {
        let Some(value) = self.value().cloned() else {
            return;
        };
        let mut props = EditorProps::new(value, self);
        editor.on_event(&mut props, event);
    }
}

impl EditHandle for EditSession {
    fn update(&mut self, next: CellValue, keep_editing: bool) {
        let EditState::Editing { cell, value } = &mut self.state else {
            tracing::trace!(target: crate::targets::EDIT, "update outside an edit ignored");
            return;
        };
        let cell = *cell;
        if keep_editing {
            *value = next.clone();
            tracing::trace!(
                target: crate::targets::EDIT,
                row = cell.row,
                col = cell.col,
                "provisional commit"
            );
            self.commits.push(Commit {
                cell,
                value: next,
                provisional: true,
            });
            return;
        }
        tracing::debug!(
            target: crate::targets::EDIT,
            row = cell.row,
            col = cell.col,
            "edit committed"
        );
        self.commits.push(Commit {
            cell,
            value: next,
            provisional: false,
        });
        self.state = EditState::Idle;
        self.focused = false;
    }

    fn cancel(&mut self) {
        if self.is_editing() {
            tracing::debug!(target: crate::targets::EDIT, "edit cancelled");
        }
        self.state = EditState::Idle;
        self.focused = false;
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::NumberEditor;
    use crate::editor::SearchSelectEditor;
    use crate::input::KeyCode;
    use crate::keymap;

    fn money() -> EditorSpec {
        EditorSpec::custom(NumberEditor::new())
    }

    #[test]
    fn on_activate_columns_ignore_focus() {
        let mut s = EditSession::new();
        let cell = Cell::new(0, 5);
        assert!(!s.activate(cell, &money(), ActivationTrigger::Focus, CellValue::Number(1.0)));
        assert!(!s.is_editing());
        assert!(s.activate(cell, &money(), ActivationTrigger::Enter, CellValue::Number(1.0)));
        assert_eq!(s.cell(), Some(cell));
    }

    #[test]
    fn always_columns_open_on_focus() {
        let mut s = EditSession::new();
        let spec = EditorSpec::custom(SearchSelectEditor::from_values(["Jack"])).always();
        assert!(s.activate(Cell::new(1, 4), &spec, ActivationTrigger::Focus, CellValue::Empty));
        assert!(s.is_editing());
    }

    #[test]
    fn provisional_updates_stay_editing_until_commit() {
        let mut s = EditSession::new();
        let spec = money();
        let ed = spec.editor();
        s.activate(Cell::new(2, 5), &spec, ActivationTrigger::Enter, CellValue::Number(10.0));

        s.dispatch_key(ed.as_ref(), &keymap::key(KeyCode::Up));
        assert_eq!(s.value(), Some(&CellValue::Number(11.0)));
        assert!(s.is_editing());
        assert_eq!(
            s.take_commits(),
            vec![Commit {
                cell: Cell::new(2, 5),
                value: CellValue::Number(11.0),
                provisional: true,
            }]
        );

        s.dispatch_key(ed.as_ref(), &keymap::key(KeyCode::Enter));
        assert!(!s.is_editing());
        assert_eq!(
            s.take_commits(),
            vec![Commit {
                cell: Cell::new(2, 5),
                value: CellValue::Number(11.0),
                provisional: false,
            }]
        );
        assert!(s.take_commits().is_empty());
    }

    #[test]
    fn cancel_ends_edit_but_keeps_provisional_commits() {
        let mut s = EditSession::new();
        let spec = money();
        s.activate(Cell::new(0, 5), &spec, ActivationTrigger::Enter, CellValue::Number(3.0));
        s.dispatch_key(spec.editor().as_ref(), &keymap::key(KeyCode::Up));
        s.dispatch_key(spec.editor().as_ref(), &keymap::key(KeyCode::Up));
        s.dispatch_event(spec.editor().as_ref(), EditorEvent::Blur);
        assert!(!s.is_editing());

        let values: Vec<CellValue> = s.take_commits().into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec![CellValue::Number(4.0), CellValue::Number(5.0)]);
    }

    #[test]
    fn cancel_without_changes_commits_nothing() {
        let mut s = EditSession::new();
        let spec = money();
        s.activate(Cell::new(0, 5), &spec, ActivationTrigger::Enter, CellValue::Number(3.0));
        s.dispatch_key(spec.editor().as_ref(), &keymap::key(KeyCode::Esc));
        assert!(!s.is_editing());
        assert!(s.take_commits().is_empty());
    }

    #[test]
    fn focus_and_blur_do_not_change_edit_state() {
        let mut s = EditSession::new();
        let spec = EditorSpec::custom(SearchSelectEditor::from_values(["Jack"])).always();
        s.activate(Cell::new(0, 4), &spec, ActivationTrigger::Focus, CellValue::Empty);
        s.dispatch_event(spec.editor().as_ref(), EditorEvent::DropdownVisible(true));
        assert!(s.has_focus());
        assert!(s.is_editing());
        s.dispatch_event(spec.editor().as_ref(), EditorEvent::DropdownVisible(false));
        assert!(!s.has_focus());
        assert!(s.is_editing());
    }
}
