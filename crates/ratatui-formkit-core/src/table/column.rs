use crate::table::value::Record;
use crate::table::value::ValueRef;
use ratatui::layout::Alignment;
use ratatui::text::Line;
use std::fmt;
use std::rc::Rc;

/// Horizontal placement of a column's header and cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    #[default]
    Start,
    Center,
    End,
}

impl From<ColumnAlign> for Alignment {
    fn from(align: ColumnAlign) -> Self {
        match align {
            ColumnAlign::Start => Alignment::Left,
            ColumnAlign::Center => Alignment::Center,
            ColumnAlign::End => Alignment::Right,
        }
    }
}

/// Custom cell renderer: `(value, row, display_index) -> line`.
pub type CellRenderer<R> = Rc<dyn Fn(Option<ValueRef<'_>>, &R, usize) -> Line<'static>>;

/// Describes one table column.
pub struct Column<R> {
    key: String,
    title: String,
    sortable: bool,
    align: ColumnAlign,
    width: Option<u16>,
    renderer: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            align: ColumnAlign::Start,
            width: None,
            renderer: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }

    /// Fixed width in terminal columns. Columns without a width share the leftover space.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn renderer<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<ValueRef<'_>>, &R, usize) -> Line<'static> + 'static,
    {
        self.renderer = Some(Rc::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn alignment(&self) -> ColumnAlign {
        self.align
    }

    pub fn width_hint(&self) -> Option<u16> {
        self.width
    }
}

impl<R: Record> Column<R> {
    /// Produces the display line for this column's cell in `row`.
    ///
    /// Without a custom renderer the value's text form is used, and null/missing values render
    /// as an empty line.
    pub fn render_cell(&self, row: &R, display_index: usize) -> Line<'static> {
        let value = row.field(&self.key);
        if let Some(renderer) = &self.renderer {
            return renderer(value, row, display_index);
        }
        match value {
            None | Some(ValueRef::Null) => Line::default(),
            Some(v) => Line::from(v.to_string()),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            align: self.align,
            width: self.width,
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Splits `total` columns between `columns`, leaving `gap` between neighbours and `reserved`
/// in front (the selection checkbox).
///
/// Fixed widths are honoured first (and shrunk from the right when they overflow); columns
/// without a hint share what is left, earlier columns taking the remainder.
pub fn layout_widths<R>(columns: &[Column<R>], total: u16, gap: u16, reserved: u16) -> Vec<u16> {
    if columns.is_empty() {
        return Vec::new();
    }
    let gaps = gap.saturating_mul(columns.len() as u16 - 1);
    let mut avail = total.saturating_sub(reserved).saturating_sub(gaps);

    let mut widths: Vec<u16> = Vec::with_capacity(columns.len());
    for c in columns {
        let w = c.width.map(|w| w.min(avail)).unwrap_or(0);
        avail -= w;
        widths.push(w);
    }

    let flexible = columns.iter().filter(|c| c.width.is_none()).count() as u16;
    if flexible > 0 {
        let share = avail / flexible;
        let mut extra = avail % flexible;
        for (w, c) in widths.iter_mut().zip(columns) {
            if c.width.is_none() {
                *w = share + u16::from(extra > 0);
                extra = extra.saturating_sub(1);
            }
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::value::Row;

    #[test]
    fn default_cell_text_and_custom_renderer() {
        let plain: Column<Row> = Column::new("age", "Age");
        let row = Row::new().with("age", 41).with("name", "Amy");
        assert_eq!(plain.render_cell(&row, 0), Line::from("41"));
        assert_eq!(
            Column::<Row>::new("missing", "M").render_cell(&row, 0),
            Line::default()
        );

        let custom: Column<Row> = Column::new("name", "Name").renderer(|v, _, idx| {
            Line::from(format!("{idx}:{}", v.map(|v| v.to_string()).unwrap_or_default()))
        });
        assert_eq!(custom.render_cell(&row, 3), Line::from("3:Amy"));
    }

    #[test]
    fn widths_share_leftover_space() {
        let columns: Vec<Column<Row>> = vec![
            Column::new("id", "ID").width(4),
            Column::new("name", "Name"),
            Column::new("email", "Email"),
        ];
        // 30 - reserved 4 - gaps 2 = 24; fixed 4 leaves 20 for two flexible columns
        assert_eq!(layout_widths(&columns, 30, 1, 4), vec![4, 10, 10]);
        // odd remainder goes to the first flexible column
        assert_eq!(layout_widths(&columns, 31, 1, 4), vec![4, 11, 10]);
    }

    #[test]
    fn fixed_widths_shrink_when_space_runs_out() {
        let columns: Vec<Column<Row>> = vec![
            Column::new("a", "A").width(6),
            Column::new("b", "B").width(6),
        ];
        assert_eq!(layout_widths(&columns, 9, 1, 0), vec![6, 2]);
        assert!(layout_widths::<Row>(&[], 10, 1, 0).is_empty());
    }
}
