use crate::table::column::Column;
use crate::table::identity::RowKey;
use crate::table::identity::RowKeySource;
use crate::table::model::TableModel;
use crate::table::model::build_model;
use crate::table::selection::SelectAllState;
use crate::table::selection::SelectionSet;
use crate::table::sort::SortState;
use crate::table::value::Record;
use log::debug;
use ratatui::style::Modifier;
use ratatui::style::Style;
use std::fmt;

/// Options for [`DataTable`] and [`crate::table::DataTableView`].
///
/// Styles left at `Style::default()` fall back to the [`crate::theme::Theme`] at render time.
pub struct DataTableOptions<R> {
    /// Enables the checkbox column and every selection operation.
    pub selectable: bool,
    pub row_key: RowKeySource<R>,
    pub empty_message: String,
    pub empty_icon: Option<String>,
    pub show_header: bool,
    pub show_scrollbar: bool,
    pub col_gap: u16,
    pub style: Style,
    pub header_style: Style,
    pub grid_line_style: Style,
    pub cursor_style: Style,
    pub selected_style: Style,
    pub empty_style: Style,
}

impl<R> Default for DataTableOptions<R> {
    fn default() -> Self {
        Self {
            selectable: false,
            row_key: RowKeySource::default(),
            empty_message: "No data".to_string(),
            empty_icon: None,
            show_header: true,
            show_scrollbar: true,
            col_gap: 1,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            grid_line_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            selected_style: Style::default().add_modifier(Modifier::BOLD),
            empty_style: Style::default(),
        }
    }
}

impl<R> Clone for DataTableOptions<R> {
    fn clone(&self) -> Self {
        Self {
            selectable: self.selectable,
            row_key: self.row_key.clone(),
            empty_message: self.empty_message.clone(),
            empty_icon: self.empty_icon.clone(),
            show_header: self.show_header,
            show_scrollbar: self.show_scrollbar,
            col_gap: self.col_gap,
            style: self.style,
            header_style: self.header_style,
            grid_line_style: self.grid_line_style,
            cursor_style: self.cursor_style,
            selected_style: self.selected_style,
            empty_style: self.empty_style,
        }
    }
}

impl<R> fmt::Debug for DataTableOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTableOptions")
            .field("selectable", &self.selectable)
            .field("row_key", &self.row_key)
            .field("empty_message", &self.empty_message)
            .field("empty_icon", &self.empty_icon)
            .field("show_header", &self.show_header)
            .field("show_scrollbar", &self.show_scrollbar)
            .field("col_gap", &self.col_gap)
            .finish_non_exhaustive()
    }
}

/// Rows, columns, and the sort/selection state of one table, without any rendering.
///
/// Selection mutators return the resulting selected rows (display order) so callers can keep
/// their own state in sync with row objects rather than keys.
pub struct DataTable<R> {
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    options: DataTableOptions<R>,
    sort: SortState,
    selection: SelectionSet,
}

impl<R: Record> DataTable<R> {
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self::with_options(columns, DataTableOptions::default())
    }

    pub fn with_options(columns: Vec<Column<R>>, options: DataTableOptions<R>) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            options,
            sort: SortState::default(),
            selection: SelectionSet::default(),
        }
    }

    /// Replaces the rows. Sort and selection are kept; keys with no matching row are ignored.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        debug!("table: {} rows", rows.len());
        self.rows = rows;
    }

    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
    }

    pub fn set_options(&mut self, options: DataTableOptions<R>) {
        self.options = options;
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn options(&self) -> &DataTableOptions<R> {
        &self.options
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn set_sort_state(&mut self, sort: SortState) {
        self.sort = sort;
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selectable(&self) -> bool {
        self.options.selectable
    }

    /// Activates the column with `key`. Returns `false` for unknown or non-sortable columns.
    pub fn activate_column(&mut self, key: &str) -> bool {
        match self.columns.iter().find(|c| c.key() == key) {
            Some(column) => self.sort.activate(column),
            None => false,
        }
    }

    pub fn model(&self) -> TableModel<'_, R> {
        build_model(
            &self.rows,
            &self.columns,
            &self.sort,
            &self.selection,
            &self.options.row_key,
        )
    }

    pub fn toggle_row(&mut self, key: RowKey, included: bool) -> Vec<&R> {
        if !self.options.selectable {
            return Vec::new();
        }
        self.selection.toggle_row(key, included);
        self.selected_rows()
    }

    /// Selects exactly the rows currently displayed.
    pub fn select_all(&mut self) -> Vec<&R> {
        if !self.options.selectable {
            return Vec::new();
        }
        let keys: Vec<RowKey> = self.model().rows.into_iter().map(|r| r.key).collect();
        self.selection.select_all(&keys);
        self.selected_rows()
    }

    pub fn clear_all(&mut self) -> Vec<&R> {
        if !self.options.selectable {
            return Vec::new();
        }
        self.selection.clear_all();
        Vec::new()
    }

    /// Header checkbox semantics: checking selects every displayed row, unchecking clears.
    pub fn toggle_all(&mut self, checked: bool) -> Vec<&R> {
        if checked {
            self.select_all()
        } else {
            self.clear_all()
        }
    }

    pub fn selected_rows(&self) -> Vec<&R> {
        self.model().selected_rows()
    }

    pub fn all_selected(&self) -> bool {
        self.selection.all_selected(self.rows.len())
    }

    pub fn some_selected(&self) -> bool {
        self.selection.some_selected(self.rows.len())
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.selection.select_all_state(self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::value::Row;

    fn table() -> DataTable<Row> {
        let mut t = DataTable::with_options(
            vec![
                Column::new("id", "ID"),
                Column::new("name", "Name").sortable(true),
            ],
            DataTableOptions {
                selectable: true,
                ..Default::default()
            },
        );
        t.set_rows(vec![
            Row::new().with("id", 1).with("name", "Bob"),
            Row::new().with("id", 2).with("name", "Amy"),
            Row::new().with("id", 3).with("name", "Cid"),
        ]);
        t
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.text("name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn mutators_return_resolved_rows() {
        let mut t = table();
        assert_eq!(names(&t.toggle_row(RowKey::from(3), true)), ["Cid"]);
        assert_eq!(names(&t.toggle_row(RowKey::from(1), true)), ["Bob", "Cid"]);
        assert!(t.some_selected());
        assert_eq!(names(&t.toggle_all(true)), ["Bob", "Amy", "Cid"]);
        assert!(t.all_selected());
        assert!(t.toggle_all(false).is_empty());
        assert_eq!(t.select_all_state(), SelectAllState::None);
    }

    #[test]
    fn selection_survives_resort() {
        let mut t = table();
        t.toggle_row(RowKey::from(2), true);
        assert!(t.activate_column("name"));
        assert_eq!(names(&t.selected_rows()), ["Amy"]);
        assert!(t.activate_column("name"));
        assert_eq!(names(&t.selected_rows()), ["Amy"]);
    }

    #[test]
    fn select_all_uses_display_order() {
        let mut t = table();
        t.activate_column("name");
        assert_eq!(names(&t.select_all()), ["Amy", "Bob", "Cid"]);
    }

    #[test]
    fn unknown_or_unsortable_columns_do_not_sort() {
        let mut t = table();
        assert!(!t.activate_column("id"));
        assert!(!t.activate_column("nope"));
        assert!(t.sort_state().is_unsorted());
    }

    #[test]
    fn non_selectable_table_ignores_selection() {
        let mut t = table();
        t.set_options(DataTableOptions::default());
        assert!(t.toggle_row(RowKey::from(1), true).is_empty());
        assert!(t.select_all().is_empty());
        assert!(t.selection().is_empty());
    }

    #[test]
    fn narrowed_rows_ignore_stale_keys() {
        let mut t = table();
        t.select_all();
        t.set_rows(vec![Row::new().with("id", 2).with("name", "Amy")]);
        assert_eq!(names(&t.selected_rows()), ["Amy"]);
        // The set still holds three keys against one displayed row.
        assert_eq!(t.selection().len(), 3);
        assert!(!t.all_selected());
        assert!(!t.some_selected());
    }
}
