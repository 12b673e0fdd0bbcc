//! Drag-selection rectangle drawn over a grid.
//!
//! The overlay is a leaf: it is handed the drag anchor, the current drag point and whether a
//! drag is in progress, and derives a box from them. It never normalises the box. Dragging up
//! or left yields negative `width`/`height`, and callers that need a positive box must swap the
//! points themselves.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::geometry::Point;
use crate::geometry::SelectorRect;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionOverlayProps {
    pub selecting: bool,
    pub start: Point,
    pub end: Point,
}

impl SelectionOverlayProps {
    pub fn new(selecting: bool, start: Point, end: Point) -> Self {
        Self {
            selecting,
            start,
            end,
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SelectionOverlayOptions {
    /// Overrides [`Theme::cell_selector`] when not the default style.
    pub style: Style,
}

/// Renders the drag-selection box, re-deriving it only when its props change.
#[derive(Clone, Debug, Default)]
pub struct SelectionOverlay {
    props: SelectionOverlayProps,
    options: SelectionOverlayOptions,
    rendered: Option<SelectorRect>,
}

impl SelectionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SelectionOverlayOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn props(&self) -> SelectionOverlayProps {
        self.props
    }

    /// The last derived box, `None` while no drag is active.
    pub fn rect(&self) -> Option<SelectorRect> {
        self.rendered
    }

    /// Applies new props. Returns `true` if the overlay changed and needs a redraw.
    pub fn set_props(&mut self, next: SelectionOverlayProps) -> bool {
        if !should_update(&self.props, &next) {
            tracing::trace!(target: crate::targets::SELECTION, "overlay props unchanged");
            return false;
        }
        self.props = next;
        self.rendered = selector_rect(&next);
        true
    }

    /// Paints the box into `buf`, offset by the grid's `origin` on screen.
    ///
    /// Only boxes with positive width and height cover any cells; a reverse drag paints nothing.
    pub fn render_ref(&self, origin: Rect, buf: &mut Buffer, theme: &Theme) {
        let Some(r) = self.rendered else {
            return;
        };
        if !r.has_area() {
            return;
        }
        let style = if self.options.style == Style::default() {
            theme.cell_selector
        } else {
            self.options.style
        };

        // i64 holds any u16 origin plus any i32-derived offset and extent
        let x0 = i64::from(origin.x) + r.left;
        let y0 = i64::from(origin.y) + r.top;
        let x1 = (x0 + r.width).min(i64::from(origin.right()));
        let y1 = (y0 + r.height).min(i64::from(origin.bottom()));
        let x0 = x0.max(i64::from(origin.x));
        let y0 = y0.max(i64::from(origin.y));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let area = Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16);
        buf.set_style(area.intersection(buf.area), style);
    }
}

/// Derives the selection box for `props`, or `None` when no drag is active.
pub fn selector_rect(props: &SelectionOverlayProps) -> Option<SelectorRect> {
    if !props.selecting {
        return None;
    }
    Some(SelectorRect {
        left: i64::from(props.start.x),
        top: i64::from(props.start.y),
        width: i64::from(props.end.x) - i64::from(props.start.x),
        height: i64::from(props.end.y) - i64::from(props.start.y),
    })
}

/// `true` iff any of `selecting`, `start`, `end` differ.
pub fn should_update(prev: &SelectionOverlayProps, next: &SelectionOverlayProps) -> bool {
    prev.selecting != next.selecting || prev.start != next.start || prev.end != next.end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(selecting: bool, a: (i32, i32), b: (i32, i32)) -> SelectionOverlayProps {
        SelectionOverlayProps::new(selecting, Point::new(a.0, a.1), Point::new(b.0, b.1))
    }

    #[test]
    fn inactive_overlay_renders_nothing() {
        for (a, b) in [((0, 0), (0, 0)), ((10, 20), (50, 80)), ((50, 80), (-3, 7))] {
            assert_eq!(selector_rect(&props(false, a, b)), None);
        }
    }

    #[test]
    fn forward_drag_yields_positive_box() {
        assert_eq!(
            selector_rect(&props(true, (10, 20), (50, 80))),
            Some(SelectorRect {
                left: 10,
                top: 20,
                width: 40,
                height: 60
            })
        );
    }

    #[test]
    fn reverse_drag_keeps_negative_dimensions() {
        assert_eq!(
            selector_rect(&props(true, (50, 80), (10, 20))),
            Some(SelectorRect {
                left: 50,
                top: 80,
                width: -40,
                height: -60
            })
        );
    }

    #[test]
    fn set_props_is_equality_gated() {
        let mut o = SelectionOverlay::new();
        assert!(!o.set_props(SelectionOverlayProps::idle()));
        assert!(o.set_props(props(true, (1, 1), (3, 2))));
        assert!(!o.set_props(props(true, (1, 1), (3, 2))));
        assert!(o.set_props(props(true, (1, 1), (4, 2))));
        assert_eq!(o.rect().map(|r| r.width), Some(3));
        assert!(o.set_props(props(false, (1, 1), (4, 2))));
        assert_eq!(o.rect(), None);
    }

    #[test]
    fn paints_only_positive_boxes_inside_origin() {
        let theme = Theme::default();
        let origin = Rect::new(2, 1, 10, 5);

        let mut o = SelectionOverlay::new();
        o.set_props(props(true, (1, 1), (4, 3)));
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 8));
        o.render_ref(origin, &mut buf, &theme);
        assert_eq!(buf.cell((3, 2)).map(|c| c.bg), theme.cell_selector.bg);
        assert_eq!(buf.cell((5, 3)).map(|c| c.bg), theme.cell_selector.bg);
        assert_ne!(buf.cell((6, 3)).map(|c| c.bg), theme.cell_selector.bg);
        assert_ne!(buf.cell((5, 4)).map(|c| c.bg), theme.cell_selector.bg);

        let mut reversed = SelectionOverlay::new();
        reversed.set_props(props(true, (4, 3), (1, 1)));
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 8));
        reversed.render_ref(origin, &mut buf, &theme);
        assert!(buf.content.iter().all(|c| Some(c.bg) != theme.cell_selector.bg));
    }

    #[test]
    fn extreme_points_do_not_overflow() {
        let wide = selector_rect(&props(true, (i32::MIN, i32::MAX), (i32::MAX, i32::MIN)));
        assert_eq!(
            wide,
            Some(SelectorRect {
                left: i64::from(i32::MIN),
                top: i64::from(i32::MAX),
                width: u32::MAX as i64,
                height: -(u32::MAX as i64),
            })
        );

        let theme = Theme::default();
        let origin = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(origin);

        let mut covering = SelectionOverlay::new();
        covering.set_props(props(true, (i32::MIN, i32::MIN), (i32::MAX, i32::MAX)));
        covering.render_ref(origin, &mut buf, &theme);
        assert!(buf.content.iter().all(|c| Some(c.bg) == theme.cell_selector.bg));

        let mut far = SelectionOverlay::new();
        far.set_props(props(true, (i32::MAX - 1, 0), (i32::MAX, 2)));
        let mut buf = Buffer::empty(origin);
        far.render_ref(origin, &mut buf, &theme);
        assert!(buf.content.iter().all(|c| Some(c.bg) != theme.cell_selector.bg));
    }
}
