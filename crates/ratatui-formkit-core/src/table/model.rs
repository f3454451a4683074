use crate::table::column::Column;
use crate::table::column::ColumnAlign;
use crate::table::identity::RowKey;
use crate::table::identity::RowKeySource;
use crate::table::selection::SelectAllState;
use crate::table::selection::SelectionSet;
use crate::table::sort::SortDirection;
use crate::table::sort::SortState;
use crate::table::sort::sorted_indices;
use crate::table::value::Record;

/// Header decoration for one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortIndicator {
    /// Column cannot be sorted.
    None,
    /// Sortable, but another column (or nothing) is active.
    Sortable,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn symbol(self) -> &'static str {
        match self {
            SortIndicator::None => "",
            SortIndicator::Sortable => "↕",
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub indicator: SortIndicator,
    pub align: ColumnAlign,
    pub width: Option<u16>,
}

/// One row as it should be displayed.
#[derive(Debug)]
pub struct DisplayRow<'a, R> {
    pub row: &'a R,
    /// Position in the caller's row collection.
    pub source_index: usize,
    /// Position on screen (after sorting).
    pub display_index: usize,
    pub key: RowKey,
    pub selected: bool,
}

impl<R> Clone for DisplayRow<'_, R> {
    fn clone(&self) -> Self {
        Self {
            row: self.row,
            source_index: self.source_index,
            display_index: self.display_index,
            key: self.key.clone(),
            selected: self.selected,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct TableModel<'a, R> {
    pub rows: Vec<DisplayRow<'a, R>>,
    pub headers: Vec<HeaderCell<'a>>,
    /// Displayed rows whose key is selected.
    pub selected_count: usize,
    pub select_all: SelectAllState,
    /// No rows to show; render the empty-state content instead.
    pub is_empty: bool,
}

impl<'a, R> TableModel<'a, R> {
    pub fn selected_rows(&self) -> Vec<&'a R> {
        self.rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.row)
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.rows.iter().map(|r| &r.key)
    }

    /// Display position of the row that sits at `source_index` in the input.
    pub fn display_index_of(&self, source_index: usize) -> Option<usize> {
        self.rows.iter().position(|r| r.source_index == source_index)
    }
}

/// Maps rows + columns + sort/selection state to what should be on screen.
///
/// Sorting happens before identity keys are resolved, so a [`RowKeySource::Field`] fallback sees
/// display positions. Nothing passed in is modified.
pub fn build_model<'a, R: Record>(
    rows: &'a [R],
    columns: &'a [Column<R>],
    sort: &SortState,
    selection: &SelectionSet,
    row_key: &RowKeySource<R>,
) -> TableModel<'a, R> {
    let display: Vec<DisplayRow<'a, R>> = sorted_indices(rows, sort)
        .into_iter()
        .enumerate()
        .map(|(display_index, source_index)| {
            let row = &rows[source_index];
            let key = row_key.identity_of(row, display_index);
            let selected = selection.contains(&key);
            DisplayRow {
                row,
                source_index,
                display_index,
                key,
                selected,
            }
        })
        .collect();

    let headers = columns
        .iter()
        .map(|c| HeaderCell {
            key: c.key(),
            title: c.title(),
            indicator: indicator_for(c, sort),
            align: c.alignment(),
            width: c.width_hint(),
        })
        .collect();

    let selected_count = display.iter().filter(|r| r.selected).count();
    let select_all = selection.select_all_state(display.len());
    let is_empty = display.is_empty();

    TableModel {
        rows: display,
        headers,
        selected_count,
        select_all,
        is_empty,
    }
}

fn indicator_for<R>(column: &Column<R>, sort: &SortState) -> SortIndicator {
    if !column.is_sortable() {
        return SortIndicator::None;
    }
    match sort.direction_for(column.key()) {
        Some(SortDirection::Ascending) => SortIndicator::Ascending,
        Some(SortDirection::Descending) => SortIndicator::Descending,
        None => SortIndicator::Sortable,
    }
}
