use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::Binding;
use crate::render;
use crate::table::bindings::DataTableBindings;
use crate::table::column::Column;
use crate::table::column::layout_widths;
use crate::table::data_table::DataTable;
use crate::table::data_table::DataTableOptions;
use crate::table::model::HeaderCell;
use crate::table::model::SortIndicator;
use crate::table::model::TableModel;
use crate::table::selection::SelectAllState;
use crate::table::value::Record;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

const CHECKBOX_W: u16 = 3;
const MOUSE_SCROLL_ROWS: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    SortChanged,
    /// The selection changed; read it back with [`DataTableView::selected_rows`].
    SelectionChanged,
    /// Enter was pressed on a row; carries the row's index in the caller's collection.
    Activated(usize),
}

/// Screen geometry from the last render, used for mouse hit-testing.
#[derive(Clone, Debug, Default)]
struct TableLayout {
    header: Option<Rect>,
    body: Rect,
    checkbox_x: Option<u16>,
    /// `(x, width)` per column.
    cols: Vec<(u16, u16)>,
    gap: u16,
}

impl TableLayout {
    fn column_at(&self, x: u16) -> Option<usize> {
        self.cols
            .iter()
            .position(|&(cx, w)| x >= cx && x < cx.saturating_add(w))
    }

    fn on_checkbox(&self, x: u16) -> bool {
        self.checkbox_x
            .is_some_and(|cx| x >= cx && x < cx + CHECKBOX_W)
    }

    /// Draws `│` in the gap before each data column; the checkbox column has none.
    fn draw_separators(&self, y: u16, buf: &mut Buffer, style: Style) {
        if self.gap == 0 {
            return;
        }
        let right = self.body.right();
        for &(x, _) in self.cols.iter().skip(1) {
            let sep_x = x.saturating_sub(self.gap);
            if sep_x < right {
                buf.set_span(sep_x, y, &Span::styled("│", style), 1);
            }
        }
    }
}

/// A sortable, selectable table widget.
///
/// Holds a [`DataTable`] plus the UI-only state: the row cursor, the focused column (the one the
/// sort key acts on), and the vertical scroll position. Rows are drawn in full; there is no
/// virtualization.
pub struct DataTableView<R> {
    pub state: ViewportState,
    table: DataTable<R>,
    bindings: DataTableBindings,
    cursor: Option<usize>,
    focused_col: usize,
    layout: TableLayout,
}

impl<R: Record> DataTableView<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self::with_options(columns, DataTableOptions::default())
    }

    pub fn with_options(columns: Vec<Column<R>>, options: DataTableOptions<R>) -> Self {
        Self {
            state: ViewportState::default(),
            table: DataTable::with_options(columns, options),
            bindings: DataTableBindings::default(),
            cursor: None,
            focused_col: 0,
            layout: TableLayout::default(),
        }
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<R> {
        &mut self.table
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.table.set_rows(rows);
        self.clamp_cursor();
        self.state.set_content(self.state.content_w, self.row_count() as u32);
    }

    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.table.set_columns(columns);
        self.focused_col = self
            .focused_col
            .min(self.table.columns().len().saturating_sub(1));
    }

    pub fn set_bindings(&mut self, bindings: DataTableBindings) {
        self.bindings = bindings;
    }

    pub fn bindings(&self) -> &DataTableBindings {
        &self.bindings
    }

    /// Help bar entries for the current configuration.
    pub fn help(&self) -> Vec<Binding> {
        self.bindings.help(self.table.is_selectable())
    }

    pub fn row_count(&self) -> usize {
        self.table.rows().len()
    }

    /// Cursor position in display order.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
        self.clamp_cursor();
        if let Some(c) = self.cursor {
            self.state.ensure_visible_y(c as u32);
        }
    }

    pub fn focused_column(&self) -> usize {
        self.focused_col
    }

    pub fn model(&self) -> TableModel<'_, R> {
        self.table.model()
    }

    pub fn selected_rows(&self) -> Vec<&R> {
        self.table.selected_rows()
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DataTableAction {
        match event {
            InputEvent::Paste(_) => DataTableAction::None,
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(m) => self.handle_mouse(m),
        }
    }

    /// Activates the focused column's sort cycle, keeping the cursor on the same row.
    pub fn sort_focused(&mut self) -> DataTableAction {
        let Some(key) = self
            .table
            .columns()
            .get(self.focused_col)
            .map(|c| c.key().to_string())
        else {
            return DataTableAction::None;
        };
        let cursor_source = self
            .cursor
            .and_then(|c| self.table.model().rows.get(c).map(|r| r.source_index));
        if !self.table.activate_column(&key) {
            return DataTableAction::None;
        }
        if let Some(src) = cursor_source {
            self.cursor = self.table.model().display_index_of(src);
            if let Some(c) = self.cursor {
                self.state.ensure_visible_y(c as u32);
            }
        }
        DataTableAction::SortChanged
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let options = self.table.options();

        let (content_area, scrollbar_x) = if options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let header_h = u16::from(options.show_header).min(content_area.height);
        let header_area = Rect::new(content_area.x, content_area.y, content_area.width, header_h);
        let body_area = Rect::new(
            content_area.x,
            content_area.y + header_h,
            content_area.width,
            content_area.height.saturating_sub(header_h),
        );

        let styles = TableStyles::resolve(options, theme);
        let gap = options.col_gap;
        let reserved = if options.selectable {
            CHECKBOX_W + gap
        } else {
            0
        };

        let widths = layout_widths(self.table.columns(), content_area.width, gap, reserved);
        let mut cols = Vec::with_capacity(widths.len());
        let mut x = content_area.x + reserved.min(content_area.width);
        for w in widths {
            cols.push((x, w));
            x = x.saturating_add(w).saturating_add(gap);
        }
        self.layout = TableLayout {
            header: (header_h > 0).then_some(header_area),
            body: body_area,
            checkbox_x: options.selectable.then_some(content_area.x),
            cols,
            gap,
        };

        self.state.set_viewport(body_area.width, body_area.height);
        self.state
            .set_content(body_area.width as u32, self.table.rows().len() as u32);
        self.clamp_cursor();

        buf.set_style(content_area, styles.base);
        let model = self.table.model();

        if header_area.height > 0 {
            let ctx = HeaderContext {
                area: header_area,
                layout: &self.layout,
                focused_col: self.focused_col,
                styles: &styles,
            };
            render_header(&ctx, buf, &model);
        }

        if model.is_empty {
            render_empty(body_area, buf, self.table.options(), styles.empty);
        } else {
            let ctx = BodyContext {
                area: body_area,
                layout: &self.layout,
                first_row: self.state.y as usize,
                cursor: self.cursor,
                styles: &styles,
            };
            render_body(&ctx, buf, &model, self.table.columns());
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, body_area.y, 1, body_area.height),
                buf,
                &self.state,
                styles.grid_line,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> DataTableAction {
        if self.bindings.sort.matches(&key) {
            return self.sort_focused();
        }
        if self.bindings.toggle_row.matches(&key) {
            return self.toggle_cursor_row();
        }
        if self.bindings.toggle_all.matches(&key) {
            return self.toggle_all();
        }
        if self.bindings.clear.matches(&key) {
            if !self.table.is_selectable() || self.table.selection().is_empty() {
                return DataTableAction::None;
            }
            self.table.clear_all();
            return DataTableAction::SelectionChanged;
        }
        if self.bindings.activate.matches(&key) {
            return self
                .cursor
                .and_then(|c| self.table.model().rows.get(c).map(|r| r.source_index))
                .map(DataTableAction::Activated)
                .unwrap_or(DataTableAction::None);
        }

        let rows = self.row_count();
        let page = self.state.viewport_h.saturating_sub(1).max(1) as isize;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_by(-1),
            KeyCode::PageDown => self.move_cursor_by(page),
            KeyCode::PageUp => self.move_cursor_by(-page),
            KeyCode::Home | KeyCode::Char('g') => self.move_cursor_to(0),
            KeyCode::End | KeyCode::Char('G') => self.move_cursor_to(rows.saturating_sub(1)),
            KeyCode::Right | KeyCode::Char('l') => self.move_focus_by(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_focus_by(-1),
            _ => DataTableAction::None,
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> DataTableAction {
        match m.kind {
            MouseEventKind::ScrollDown => {
                self.state.scroll_y_by(MOUSE_SCROLL_ROWS);
                DataTableAction::Redraw
            }
            MouseEventKind::ScrollUp => {
                self.state.scroll_y_by(-MOUSE_SCROLL_ROWS);
                DataTableAction::Redraw
            }
            _ if m.is_left_click() => self.handle_click(m.x, m.y),
            _ => DataTableAction::None,
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) -> DataTableAction {
        let pos = Position::new(x, y);
        if self.layout.header.is_some_and(|h| h.contains(pos)) {
            if self.layout.on_checkbox(x) {
                return self.toggle_all();
            }
            let Some(col) = self.layout.column_at(x) else {
                return DataTableAction::None;
            };
            self.focused_col = col;
            return match self.sort_focused() {
                DataTableAction::None => DataTableAction::Redraw,
                other => other,
            };
        }

        if !self.layout.body.contains(pos) {
            return DataTableAction::None;
        }
        let row = self.state.y as usize + (y - self.layout.body.y) as usize;
        if row >= self.row_count() {
            return DataTableAction::None;
        }
        self.cursor = Some(row);
        if let Some(col) = self.layout.column_at(x) {
            self.focused_col = col;
        }
        if self.layout.on_checkbox(x) {
            return self.toggle_cursor_row();
        }
        DataTableAction::Redraw
    }

    fn toggle_cursor_row(&mut self) -> DataTableAction {
        if !self.table.is_selectable() {
            return DataTableAction::None;
        }
        let model = self.table.model();
        let Some(row) = self.cursor.and_then(|c| model.rows.get(c)) else {
            return DataTableAction::None;
        };
        let (key, selected) = (row.key.clone(), row.selected);
        debug!("table: toggle row {key} -> {}", !selected);
        self.table.toggle_row(key, !selected);
        DataTableAction::SelectionChanged
    }

    fn toggle_all(&mut self) -> DataTableAction {
        if !self.table.is_selectable() || self.row_count() == 0 {
            return DataTableAction::None;
        }
        let checked = self.table.select_all_state() != SelectAllState::All;
        debug!("table: select all -> {checked}");
        self.table.toggle_all(checked);
        DataTableAction::SelectionChanged
    }

    fn move_cursor_by(&mut self, delta: isize) -> DataTableAction {
        let rows = self.row_count();
        if rows == 0 {
            return DataTableAction::None;
        }
        let next = match self.cursor {
            None => 0,
            Some(c) => c.saturating_add_signed(delta).min(rows - 1),
        };
        self.move_cursor_to(next)
    }

    fn move_cursor_to(&mut self, row: usize) -> DataTableAction {
        let rows = self.row_count();
        if rows == 0 {
            return DataTableAction::None;
        }
        let row = row.min(rows - 1);
        if self.cursor == Some(row) {
            return DataTableAction::None;
        }
        self.cursor = Some(row);
        self.state.ensure_visible_y(row as u32);
        DataTableAction::Redraw
    }

    fn move_focus_by(&mut self, delta: isize) -> DataTableAction {
        let cols = self.table.columns().len();
        if cols == 0 {
            return DataTableAction::None;
        }
        let next = self.focused_col.saturating_add_signed(delta).min(cols - 1);
        if next == self.focused_col {
            return DataTableAction::None;
        }
        self.focused_col = next;
        DataTableAction::Redraw
    }

    fn clamp_cursor(&mut self) {
        let rows = self.row_count();
        self.cursor = match self.cursor {
            _ if rows == 0 => None,
            Some(c) => Some(c.min(rows - 1)),
            None => None,
        };
    }
}

#[derive(Clone, Copy)]
struct TableStyles {
    base: Style,
    header: Style,
    grid_line: Style,
    cursor: Style,
    selected: Style,
    empty: Style,
}

impl TableStyles {
    fn resolve<R>(options: &DataTableOptions<R>, theme: &Theme) -> Self {
        let or_theme = |s: Style, fallback: Style| {
            if s == Style::default() {
                fallback
            } else {
                s
            }
        };
        Self {
            base: or_theme(options.style, theme.text_primary),
            header: options.header_style.patch(theme.accent),
            grid_line: or_theme(options.grid_line_style, theme.text_muted),
            cursor: options.cursor_style.patch(theme.accent),
            selected: options.selected_style.patch(theme.accent),
            empty: or_theme(options.empty_style, theme.text_muted),
        }
    }
}

struct HeaderContext<'a> {
    area: Rect,
    layout: &'a TableLayout,
    focused_col: usize,
    styles: &'a TableStyles,
}

struct BodyContext<'a> {
    area: Rect,
    layout: &'a TableLayout,
    first_row: usize,
    cursor: Option<usize>,
    styles: &'a TableStyles,
}

fn checkbox(state: SelectAllState) -> &'static str {
    match state {
        SelectAllState::None => "[ ]",
        SelectAllState::Some => "[-]",
        SelectAllState::All => "[x]",
    }
}

/// Title plus sort indicator, truncating the title so the indicator always fits.
fn header_label(cell: &HeaderCell<'_>, width: u16) -> String {
    if cell.indicator == SortIndicator::None {
        return render::truncate_with_ellipsis(cell.title, width);
    }
    let symbol = cell.indicator.symbol();
    let symbol_w = UnicodeWidthStr::width(symbol) as u16 + 1;
    let title = render::truncate_with_ellipsis(cell.title, width.saturating_sub(symbol_w));
    format!("{title} {symbol}")
}

fn render_header<R>(ctx: &HeaderContext<'_>, buf: &mut Buffer, model: &TableModel<'_, R>) {
    let y = ctx.area.y;
    buf.set_style(ctx.area, ctx.styles.header);
    if let Some(cx) = ctx.layout.checkbox_x {
        buf.set_stringn(
            cx,
            y,
            checkbox(model.select_all),
            CHECKBOX_W as usize,
            ctx.styles.header,
        );
    }
    for (i, (cell, &(x, w))) in model.headers.iter().zip(&ctx.layout.cols).enumerate() {
        if w == 0 {
            continue;
        }
        let style = if i == ctx.focused_col {
            ctx.styles.header.add_modifier(Modifier::UNDERLINED)
        } else {
            ctx.styles.header
        };
        let label = Line::from(header_label(cell, w));
        render::render_line_aligned(
            Rect::new(x, y, w, 1),
            buf,
            &label,
            cell.align.into(),
            style,
        );
    }
    ctx.layout.draw_separators(y, buf, ctx.styles.grid_line);
}

fn render_body<R: Record>(
    ctx: &BodyContext<'_>,
    buf: &mut Buffer,
    model: &TableModel<'_, R>,
    columns: &[Column<R>],
) {
    for dy in 0..ctx.area.height {
        let Some(display) = model.rows.get(ctx.first_row + dy as usize) else {
            break;
        };
        let y = ctx.area.y + dy;
        let style = if ctx.cursor == Some(display.display_index) {
            ctx.styles.cursor
        } else if display.selected {
            ctx.styles.selected
        } else {
            ctx.styles.base
        };
        buf.set_style(Rect::new(ctx.area.x, y, ctx.area.width, 1), style);

        if let Some(cx) = ctx.layout.checkbox_x {
            let mark = if display.selected { "[x]" } else { "[ ]" };
            buf.set_stringn(cx, y, mark, CHECKBOX_W as usize, style);
        }
        for (column, &(x, w)) in columns.iter().zip(&ctx.layout.cols) {
            if w == 0 {
                continue;
            }
            let line = column.render_cell(display.row, display.display_index);
            render::render_line_aligned(
                Rect::new(x, y, w, 1),
                buf,
                &line,
                column.alignment().into(),
                style,
            );
        }
        ctx.layout.draw_separators(y, buf, ctx.styles.grid_line);
    }
}

fn render_empty<R>(area: Rect, buf: &mut Buffer, options: &DataTableOptions<R>, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let mut lines: Vec<Line<'_>> = Vec::with_capacity(2);
    if let Some(icon) = options.empty_icon.as_deref() {
        lines.push(Line::from(Span::styled(icon, style)));
    }
    let message = options.empty_message.as_str();
    lines.push(Line::from(Span::styled(message, style)));

    let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let y = top + i as u16;
        if y >= area.bottom() {
            break;
        }
        render::render_line_aligned(
            Rect::new(area.x, y, area.width, 1),
            buf,
            line,
            Alignment::Center,
            style,
        );
    }
}
