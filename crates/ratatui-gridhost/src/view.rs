//! A snapshot renderer for [`GridProps`].
//!
//! [`GridView`] is stateless: it draws whatever the host hands it and answers hit-tests against
//! the same layout, so an app can turn clicks into cells. One terminal line is one row, which
//! makes `scroll_top` a row offset.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_gridhost_core::column::Align;
use ratatui_gridhost_core::geometry::Cell;
use ratatui_gridhost_core::render;
use ratatui_gridhost_core::session::EditSession;
use ratatui_gridhost_core::theme::Theme;

use crate::event::GridProps;

const SELECTOR_WIDTH: u16 = 4;

#[derive(Clone, Debug)]
pub struct GridViewOptions {
    /// Width for columns that do not set one.
    pub default_col_width: u16,
    pub col_gap: u16,
}

impl Default for GridViewOptions {
    fn default() -> Self {
        Self {
            default_col_width: 12,
            col_gap: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ColumnSlot {
    index: usize,
    x: u16,
    width: u16,
}

#[derive(Clone, Debug, Default)]
pub struct GridView {
    options: GridViewOptions,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GridViewOptions) -> Self {
        Self { options }
    }

    /// The area below the header row. The selection overlay uses its origin.
    pub fn body_area(area: Rect) -> Rect {
        Rect {
            y: area.y.saturating_add(1),
            height: area.height.saturating_sub(1),
            ..area
        }
    }

    /// Index of the first visible row. Negative `scroll_top` pins the last row to the bottom.
    pub fn first_row(props: &GridProps<'_>, body_height: u16) -> usize {
        let max_first = props.data.len().saturating_sub(body_height as usize);
        if props.scroll_top < 0.0 {
            return max_first;
        }
        (props.scroll_top.floor() as usize).min(max_first)
    }

    fn slots(&self, area: Rect, props: &GridProps<'_>) -> Vec<ColumnSlot> {
        let right = area.right();
        let mut x = area.x;
        if props.options.show_row_selector {
            x = x.saturating_add(SELECTOR_WIDTH);
        }
        let mut out = Vec::new();
        for (index, col) in props.columns.iter().enumerate() {
            if x >= right {
                break;
            }
            let want = col.width.unwrap_or(self.options.default_col_width);
            let width = want.min(right - x);
            out.push(ColumnSlot { index, x, width });
            x = x.saturating_add(want).saturating_add(self.options.col_gap);
        }
        out
    }

    /// The screen area of `cell`, if it is visible.
    pub fn cell_area(&self, area: Rect, props: &GridProps<'_>, cell: Cell) -> Option<Rect> {
        let body = Self::body_area(area);
        let first = Self::first_row(props, body.height);
        if cell.row < first || cell.row >= props.data.len() {
            return None;
        }
        let offset = u16::try_from(cell.row - first).ok()?;
        if offset >= body.height {
            return None;
        }
        let slot = self
            .slots(area, props)
            .into_iter()
            .find(|s| s.index == cell.col)?;
        Some(Rect::new(slot.x, body.y + offset, slot.width, 1))
    }

    /// The cell under screen position (`x`, `y`).
    pub fn cell_at(&self, area: Rect, props: &GridProps<'_>, x: u16, y: u16) -> Option<Cell> {
        let body = Self::body_area(area);
        if y < body.y || y >= body.bottom() {
            return None;
        }
        let row = Self::first_row(props, body.height) + (y - body.y) as usize;
        if row >= props.data.len() {
            return None;
        }
        self.slots(area, props)
            .into_iter()
            .find(|s| x >= s.x && x < s.x + s.width)
            .map(|s| Cell::new(row, s.index))
    }

    /// The row whose selector checkbox sits at (`x`, `y`).
    pub fn selector_at(&self, area: Rect, props: &GridProps<'_>, x: u16, y: u16) -> Option<usize> {
        if !props.options.show_row_selector || x < area.x || x >= area.x + SELECTOR_WIDTH {
            return None;
        }
        let body = Self::body_area(area);
        if y < body.y || y >= body.bottom() {
            return None;
        }
        let row = Self::first_row(props, body.height) + (y - body.y) as usize;
        (row < props.data.len()).then_some(row)
    }

    pub fn render_ref(
        &self,
        area: Rect,
        buf: &mut Buffer,
        props: &GridProps<'_>,
        session: &EditSession,
        theme: &Theme,
    ) {
        if area.is_empty() {
            return;
        }
        let slots = self.slots(area, props);

        let header = Rect { height: 1, ..area };
        render::fill(header, buf, theme.header);
        for slot in &slots {
            let col = &props.columns[slot.index];
            let rect = Rect::new(slot.x, header.y, slot.width, 1);
            render::render_str_aligned(
                rect,
                buf,
                &col.label,
                props.options.header.align,
                theme.header,
            );
        }

        let body = Self::body_area(area);
        let first = Self::first_row(props, body.height);
        let focused = props.selection.focused_cell();
        let mut editing = None;

        for (offset, row) in props.data.iter().enumerate().skip(first) {
            let line = (offset - first) as u16;
            if line >= body.height {
                break;
            }
            let y = body.y + line;
            let checked = props.selected_indexes.contains(&offset);
            let row_style = if checked {
                theme.text_primary.patch(theme.selected_row)
            } else {
                theme.text_primary
            };

            if props.options.show_row_selector {
                let mark = if checked { "[x]" } else { "[ ]" };
                render::render_str_clipped(
                    area.x,
                    y,
                    0,
                    SELECTOR_WIDTH.min(area.width),
                    buf,
                    mark,
                    theme.text_muted,
                );
            }

            for slot in &slots {
                let col = &props.columns[slot.index];
                let cell = Cell::new(offset, slot.index);
                let rect = Rect::new(slot.x, y, slot.width, 1);

                if session.cell() == Some(cell) {
                    if let Some(spec) = &col.editor {
                        let width = spec.width.unwrap_or(slot.width).min(area.right() - slot.x);
                        editing = Some((Rect { width, ..rect }, spec.editor()));
                        continue;
                    }
                }

                let mut style = row_style;
                if in_selection(props, cell) {
                    style = style.patch(theme.accent);
                }
                if focused == Some(cell) {
                    style = style.patch(theme.focused_cell);
                }
                render::fill(rect, buf, style);
                let text = col.display(row.get(&col.key));
                let align = col.align.unwrap_or(Align::Left);
                render::render_str_aligned(rect, buf, &text, align, style);
            }
        }

        // drawn last so a wide editor covers its neighbours
        if let (Some((editor_area, editor)), Some(value)) = (editing, session.value()) {
            render::fill(editor_area, buf, theme.editing_cell);
            editor.render(value, editor_area, buf, theme);
        }

        if props.data.is_empty() && body.height > 0 {
            render::render_str_clipped(
                body.x,
                body.y,
                0,
                body.width,
                buf,
                "(no rows)",
                theme.text_muted,
            );
        }
    }
}

fn in_selection(props: &GridProps<'_>, cell: Cell) -> bool {
    props.selection.rows.contains(&cell.row) && props.selection.cols.contains(&cell.col)
}
