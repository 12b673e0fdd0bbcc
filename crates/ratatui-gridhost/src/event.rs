//! The callback contract between a grid and its host.
//!
//! Inbound: [`GridEvent`]s the grid emits. Outbound: [`GridProps`], a read-only snapshot the host
//! hands the grid on every render.

use ratatui_gridhost_core::column::ColumnSpec;
use ratatui_gridhost_core::geometry::Cell;
use ratatui_gridhost_core::value::Row;

use crate::options::GridOptions;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    pub scroll_top: f64,
}

/// Scroll geometry reported by the grid. Missing fields read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSizeEvent {
    pub scroll_content_height: Option<f64>,
    pub body_tr_height: Option<f64>,
}

/// Highlighted rows/columns and the focused cell. Focus indices are `-1` when nothing is focused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSelection {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub focused_row: i64,
    pub focused_col: i64,
}

impl Default for GridSelection {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            cols: Vec::new(),
            focused_row: -1,
            focused_col: -1,
        }
    }
}

impl GridSelection {
    /// Selects and focuses a single cell.
    pub fn focus(cell: Cell) -> Self {
        Self {
            rows: vec![cell.row],
            cols: vec![cell.col],
            focused_row: cell.row as i64,
            focused_col: cell.col as i64,
        }
    }

    pub fn focused_cell(&self) -> Option<Cell> {
        let row = usize::try_from(self.focused_row).ok()?;
        let col = usize::try_from(self.focused_col).ok()?;
        Some(Cell { row, col })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedEvent {
    pub selected_indexes: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    Scroll(ScrollEvent),
    ChangeScrollSize(ScrollSizeEvent),
    ChangeSelection(GridSelection),
    ChangeSelected(SelectedEvent),
}

/// What the host hands the grid each render. The grid must treat it as read-only and request
/// changes through [`GridEvent`]s.
#[derive(Clone, Copy, Debug)]
pub struct GridProps<'a> {
    pub columns: &'a [ColumnSpec],
    pub data: &'a [Row],
    /// Negative values ask the grid to scroll to the bottom.
    pub scroll_top: f64,
    pub options: &'a GridOptions,
    pub selection: &'a GridSelection,
    pub selected_indexes: &'a [usize],
    pub width: u16,
    pub height: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_has_no_focus() {
        let s = GridSelection::default();
        assert_eq!(s.focused_row, -1);
        assert_eq!(s.focused_col, -1);
        assert_eq!(s.focused_cell(), None);
        assert_eq!(GridSelection::focus(Cell::new(3, 1)).focused_cell(), Some(Cell::new(3, 1)));
    }
}
