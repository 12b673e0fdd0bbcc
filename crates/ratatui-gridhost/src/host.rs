//! The grid host: owns columns, rows, selection and scroll bookkeeping, and turns grid callbacks
//! into state transitions.
//!
//! The grid never mutates host state directly. It reads a [`GridProps`] snapshot each render and
//! reports what happened through [`GridEvent`]s, which the host applies in arrival order.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use ratatui_gridhost_core::column::ColumnSpec;
use ratatui_gridhost_core::column::first_editable;
use ratatui_gridhost_core::geometry::Cell;
use ratatui_gridhost_core::session::Commit;
use ratatui_gridhost_core::value::CellValue;
use ratatui_gridhost_core::value::Row;

use crate::error::GridError;
use crate::error::Result;
use crate::event::GridEvent;
use crate::event::GridProps;
use crate::event::GridSelection;
use crate::event::ScrollEvent;
use crate::event::ScrollSizeEvent;
use crate::event::SelectedEvent;
use crate::options::GridHostOptions;
use crate::resize::ContainerMeasure;
use crate::resize::ResizeSource;
use crate::resize::Subscription;
use crate::targets;

#[derive(Debug)]
pub struct GridHost {
    options: GridHostOptions,
    columns: Vec<ColumnSpec>,
    rows: Vec<Row>,
    new_row: Row,
    selection: GridSelection,
    // Written by `ChangeSelected`, read by `remove_rows`. Kept out of the rendered snapshot's
    // change tracking; callbacks apply synchronously, so removal always sees the latest value.
    selected_indexes: Vec<usize>,
    scroll_top: f64,
    scroll_content_height: f64,
    row_height: f64,
    width: u16,
    height: u16,
}

impl GridHost {
    /// Creates a host. `new_row` is the template appended by [`GridHost::add_row`].
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Row>, new_row: Row) -> Result<Self> {
        Self::with_options(columns, rows, new_row, GridHostOptions::default())
    }

    pub fn with_options(
        columns: Vec<ColumnSpec>,
        rows: Vec<Row>,
        new_row: Row,
        options: GridHostOptions,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.key.as_str()) {
                return Err(GridError::DuplicateColumnKey(col.key.clone()));
            }
        }

        Ok(Self {
            width: options.width,
            height: options.height,
            row_height: options.row_height,
            options,
            columns,
            rows,
            new_row,
            selection: GridSelection::default(),
            selected_indexes: Vec::new(),
            scroll_top: 0.0,
            scroll_content_height: 0.0,
        })
    }

    pub fn options(&self) -> &GridHostOptions {
        &self.options
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selection(&self) -> &GridSelection {
        &self.selection
    }

    pub fn selected_indexes(&self) -> &[usize] {
        &self.selected_indexes
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn scroll_content_height(&self) -> f64 {
        self.scroll_content_height
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height;
    }

    /// The snapshot handed to the grid.
    pub fn props(&self) -> GridProps<'_> {
        GridProps {
            columns: &self.columns,
            data: &self.rows,
            scroll_top: self.scroll_top,
            options: &self.options.grid,
            selection: &self.selection,
            selected_indexes: &self.selected_indexes,
            width: self.width,
            height: self.height,
        }
    }

    /// Appends a copy of the new-row template, asks the grid to scroll to the bottom, and
    /// focuses the new row's first editable column.
    pub fn add_row(&mut self) {
        let index = self.rows.len();
        self.rows.push(self.new_row.clone());

        // negative scroll_top = "scroll to bottom" for the grid
        self.scroll_top = -self.scroll_content_height;

        let col = first_editable(&self.columns).unwrap_or(0);
        self.selection = GridSelection::focus(Cell::new(index, col));

        tracing::debug!(
            target: targets::HOST,
            row = index,
            col,
            scroll_top = self.scroll_top,
            "row added"
        );
    }

    /// Removes every row whose index was last reported selected. No-op when nothing is.
    pub fn remove_rows(&mut self) {
        if self.selected_indexes.is_empty() {
            tracing::debug!(target: targets::HOST, "remove with empty selection ignored");
            return;
        }
        let selected: HashSet<usize> = self.selected_indexes.iter().copied().collect();
        let before = self.rows.len();
        let mut index = 0usize;
        self.rows.retain(|_| {
            let keep = !selected.contains(&index);
            index += 1;
            keep
        });
        self.selected_indexes.clear();

        tracing::debug!(
            target: targets::HOST,
            removed = before - self.rows.len(),
            remaining = self.rows.len(),
            "rows removed"
        );
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0.0;
        tracing::debug!(target: targets::HOST, "scroll to top requested");
    }

    pub fn on_scroll(&mut self, event: ScrollEvent) {
        self.scroll_top = event.scroll_top;
        tracing::debug!(target: targets::HOST, scroll_top = event.scroll_top, "scrolled");
    }

    pub fn on_change_scroll_size(&mut self, event: ScrollSizeEvent) {
        self.scroll_content_height = event.scroll_content_height.unwrap_or(0.0);
        self.row_height = event.body_tr_height.unwrap_or(0.0);
        tracing::debug!(
            target: targets::HOST,
            content_height = self.scroll_content_height,
            row_height = self.row_height,
            "scroll size changed"
        );
    }

    pub fn on_change_selection(&mut self, selection: GridSelection) {
        tracing::debug!(
            target: targets::HOST,
            focused_row = selection.focused_row,
            focused_col = selection.focused_col,
            "selection changed"
        );
        self.selection = selection;
    }

    pub fn on_change_selected(&mut self, event: SelectedEvent) {
        tracing::debug!(
            target: targets::HOST,
            selected = ?event.selected_indexes,
            "selected rows changed"
        );
        self.selected_indexes = event.selected_indexes;
    }

    /// Applies one grid callback.
    pub fn handle_event(&mut self, event: GridEvent) {
        match event {
            GridEvent::Scroll(e) => self.on_scroll(e),
            GridEvent::ChangeScrollSize(e) => self.on_change_scroll_size(e),
            GridEvent::ChangeSelection(s) => self.on_change_selection(s),
            GridEvent::ChangeSelected(e) => self.on_change_selected(e),
        }
    }

    /// Re-measures the container width. A detached container leaves the width unchanged.
    pub fn on_resize(&mut self, container: &dyn ContainerMeasure) {
        match container.width() {
            Some(width) => {
                if width != self.width {
                    tracing::debug!(
                        target: targets::HOST,
                        from = self.width,
                        to = width,
                        "resized"
                    );
                }
                self.width = width;
            }
            None => {
                tracing::warn!(target: targets::HOST, "resize measured a detached container");
            }
        }
    }

    /// Writes `value` into the cell at (`row`, `col`).
    pub fn apply_edit(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        let len = self.columns.len();
        let column = self
            .columns
            .get(col)
            .ok_or(GridError::UnknownColumn { index: col, len })?;
        if !column.is_editable() {
            return Err(GridError::NotEditable(column.key.clone()));
        }
        let key = column.key.clone();

        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(GridError::RowOutOfRange { index: row, len })?;
        tracing::debug!(target: targets::HOST, row, key = key.as_str(), ?value, "cell updated");
        target.set(key, value);
        Ok(())
    }

    pub fn apply_commit(&mut self, commit: Commit) -> Result<()> {
        self.apply_edit(commit.cell.row, commit.cell.col, commit.value)
    }

    /// Shares the host and keeps its width in sync with `container` while mounted.
    ///
    /// The resize listener is registered before the first measurement and is released when the
    /// returned handle drops. A container that is not attached yet keeps the starting width until
    /// a later resize measures it.
    pub fn mount<C>(self, source: &dyn ResizeSource, container: C) -> MountedGridHost
    where
        C: ContainerMeasure + 'static,
    {
        let host = Rc::new(RefCell::new(self));
        let container = Rc::new(container);

        let weak = Rc::downgrade(&host);
        let measure = container.clone();
        let listener = source.subscribe(Box::new(move || {
            let Some(host) = weak.upgrade() else {
                return;
            };
            if let Ok(mut host) = host.try_borrow_mut() {
                host.on_resize(measure.as_ref());
            }
        }));

        let width = {
            let mut host = host.borrow_mut();
            host.on_resize(container.as_ref());
            host.width
        };
        tracing::debug!(target: targets::HOST, width, "grid host mounted");

        MountedGridHost {
            host,
            _listener: listener,
        }
    }
}

/// A mounted host. Dropping it unregisters the resize listener.
#[derive(Debug)]
pub struct MountedGridHost {
    host: Rc<RefCell<GridHost>>,
    _listener: Subscription,
}

impl MountedGridHost {
    pub fn host(&self) -> &Rc<RefCell<GridHost>> {
        &self.host
    }

    /// Unmounts, returning the host if nothing else still shares it.
    pub fn unmount(self) -> Option<GridHost> {
        let MountedGridHost { host, _listener } = self;
        drop(_listener);
        tracing::debug!(target: targets::HOST, "grid host unmounted");
        Rc::try_unwrap(host).ok().map(RefCell::into_inner)
    }
}
