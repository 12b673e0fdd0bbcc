use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::column::Align;

/// Writes `input` at `(x, y)`, skipping the first `start_col` display columns and stopping after
/// `max_cols`. Tabs expand to four spaces; wide chars are never split.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }
    let visible = slice_by_cols(input, start_col, max_cols);
    buf.set_stringn(x, y, visible, max_cols as usize, style);
}

/// Writes a single line of `text` into `area`, positioned according to `align`.
///
/// Text wider than the area is clipped on the right regardless of alignment.
pub fn render_str_aligned(area: Rect, buf: &mut Buffer, text: &str, align: Align, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let text = slice_by_cols(text, 0, area.width);
    let w = UnicodeWidthStr::width(text.as_str()) as u16;
    let slack = area.width.saturating_sub(w);
    let dx = match align {
        Align::Left => 0,
        Align::Center => slack / 2,
        Align::Right => slack,
    };
    buf.set_stringn(area.x + dx, area.y, &text, (area.width - dx) as usize, style);
}

pub fn fill(area: Rect, buf: &mut Buffer, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let area = area.intersection(buf.area);
    buf.set_style(area, style);
}

pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> String {
    if max_cols == 0 {
        return String::new();
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let input = if input.contains('\t') {
        std::borrow::Cow::Owned(input.replace('\t', "    "))
    } else {
        std::borrow::Cow::Borrowed(input)
    };

    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut out = String::new();

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        let starts_before = col < start_col;
        col += w;
        if starts_before {
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }
        out.push(ch);
        out_cols += w;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn slice_by_cols_handles_tabs_and_width() {
        assert_eq!(slice_by_cols("\t1", 0, 4), "    ");
        assert_eq!(slice_by_cols("abcdef", 0, 3), "abc");
        assert_eq!(slice_by_cols("abcdef", 2, 3), "cde");
    }

    #[test]
    fn slice_by_cols_skips_partial_wide_char_overlap() {
        assert_eq!(slice_by_cols("你好", 0, 2), "你");
        assert_eq!(slice_by_cols("你好", 1, 2), "好");
    }

    #[test]
    fn aligned_text_lands_where_expected() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 3));
        render_str_aligned(Rect::new(0, 0, 6, 1), &mut buf, "ab", Align::Left, Style::default());
        render_str_aligned(Rect::new(0, 1, 6, 1), &mut buf, "ab", Align::Center, Style::default());
        render_str_aligned(Rect::new(0, 2, 6, 1), &mut buf, "ab", Align::Right, Style::default());
        assert_eq!(row_text(&buf, 0), "ab    ");
        assert_eq!(row_text(&buf, 1), "  ab  ");
        assert_eq!(row_text(&buf, 2), "    ab");
    }

    #[test]
    fn clipped_render_respects_start_col() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_str_clipped(0, 0, 2, 4, &mut buf, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0), "cdef");
    }
}
