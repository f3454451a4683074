use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

const TAB_WIDTH: usize = 4;

/// Draws a one-column vertical scrollbar for `state`.
///
/// When all content fits, the track is blanked instead.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            "│"
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes `input` at `(x, y)`, skipping the first `start_col` display columns and stopping after
/// `max_cols`. Wide characters that straddle either edge are dropped rather than split.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    let mut w = ClippedWriter::new(x, y, start_col, max_cols);
    w.write(buf, input, style);
}

/// Like [`render_str_clipped`] for styled spans. Spans without a style use `fallback_style`.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) {
    let mut w = ClippedWriter::new(x, y, start_col, max_cols);
    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            fallback_style.patch(span.style)
        };
        if !w.write(buf, &span.content, style) {
            return;
        }
    }
}

/// Renders `line` inside a single-row `area`, positioned by `align`.
///
/// Lines wider than the area are clipped on the right regardless of alignment.
pub fn render_line_aligned(
    area: Rect,
    buf: &mut Buffer,
    line: &Line<'_>,
    align: Alignment,
    style: Style,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let offset = align_offset(line.width() as u16, area.width, align);
    render_spans_clipped(
        area.x + offset,
        area.y,
        0,
        area.width - offset,
        buf,
        &line.spans,
        style.patch(line.style),
    );
}

/// Left padding needed to place content of `content_w` columns in `avail` columns.
pub fn align_offset(content_w: u16, avail: u16, align: Alignment) -> u16 {
    let free = avail.saturating_sub(content_w);
    match align {
        Alignment::Left => 0,
        Alignment::Center => free / 2,
        Alignment::Right => free,
    }
}

/// Returns the part of `input` visible in the column window `[start_col, start_col + max_cols)`.
pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> String {
    let start = start_col as usize;
    let max_cols = max_cols as usize;
    let mut out = String::new();
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let tab = " ".repeat(TAB_WIDTH);
    let expanded = input.replace('\t', &tab);
    for ch in expanded.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        // Also skips a wide char straddling the window start.
        if col < start {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }
        out.push(ch);
        col += w;
        out_cols += w;
    }
    out
}

/// Truncates `input` to `max_cols` display columns, ending with `…` when it was cut.
pub fn truncate_with_ellipsis(input: &str, max_cols: u16) -> String {
    if UnicodeWidthStr::width(input) <= max_cols as usize {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = slice_by_cols(input, 0, max_cols - 1);
    out.push('…');
    out
}

struct ClippedWriter {
    x: u16,
    y: u16,
    start_col: usize,
    max_cols: usize,
    col: usize,
    out_cols: usize,
}

impl ClippedWriter {
    fn new(x: u16, y: u16, start_col: u32, max_cols: u16) -> Self {
        Self {
            x,
            y,
            start_col: start_col as usize,
            max_cols: max_cols as usize,
            col: 0,
            out_cols: 0,
        }
    }

    /// Returns `false` once the window is full.
    fn write(&mut self, buf: &mut Buffer, input: &str, style: Style) -> bool {
        let mut tmp = [0u8; 4];
        for ch in input.chars() {
            if ch == '\t' {
                for _ in 0..TAB_WIDTH {
                    if !self.put(buf, " ", 1, style) {
                        return false;
                    }
                }
                continue;
            }
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if !self.put(buf, ch.encode_utf8(&mut tmp), w, style) {
                return false;
            }
        }
        true
    }

    fn put(&mut self, buf: &mut Buffer, symbol: &str, w: usize, style: Style) -> bool {
        if self.col < self.start_col {
            self.col += w;
            return true;
        }
        if self.out_cols + w > self.max_cols {
            return false;
        }
        let dx = self.out_cols as u16;
        if let Some(cell) = buf.cell_mut((self.x + dx, self.y)) {
            cell.set_style(style);
            cell.set_symbol(symbol);
        }
        // The trailing half of a wide glyph must be an empty cell.
        for extra in 1..w {
            if let Some(cell) = buf.cell_mut((self.x + dx + extra as u16, self.y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        self.col += w;
        self.out_cols += w;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn slice_by_cols_handles_tabs_and_limits_width() {
        assert_eq!(slice_by_cols("\t1", 0, 4), "    ");
        assert_eq!(slice_by_cols("abcdef", 0, 3), "abc");
        assert_eq!(slice_by_cols("abcdef", 2, 3), "cde");
    }

    #[test]
    fn slice_by_cols_skips_partial_wide_char_overlap() {
        assert_eq!(slice_by_cols("你好", 0, 2), "你");
        assert_eq!(slice_by_cols("你好", 2, 2), "好");
        assert_eq!(slice_by_cols("你好", 1, 2), "好");
    }

    #[test]
    fn truncate_adds_ellipsis_only_when_cut() {
        assert_eq!(truncate_with_ellipsis("Amy", 5), "Amy");
        assert_eq!(truncate_with_ellipsis("Amelia", 4), "Ame…");
        assert_eq!(truncate_with_ellipsis("Amelia", 0), "");
    }

    #[test]
    fn aligned_line_lands_at_expected_offset() {
        let area = Rect::new(0, 0, 7, 1);
        let mut buf = Buffer::empty(area);
        let right = Line::from("ab");
        render_line_aligned(area, &mut buf, &right, Alignment::Right, Style::default());
        assert_eq!(row_text(&buf, 0), "     ab");

        let mut buf = Buffer::empty(area);
        let centered = Line::from("abc");
        let center = Alignment::Center;
        render_line_aligned(area, &mut buf, &centered, center, Style::default());
        assert_eq!(row_text(&buf, 0), "  abc  ");
    }

    #[test]
    fn clipped_write_respects_start_and_width() {
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        render_str_clipped(0, 0, 2, 3, &mut buf, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0), "cde ");
    }
}
