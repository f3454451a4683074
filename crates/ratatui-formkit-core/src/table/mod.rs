//! Sortable, selectable data table.
//!
//! The logic is split so it can be used without rendering:
//! - [`compare`]: value ordering (nulls last in both directions)
//! - [`SortState`]: the `Unsorted -> Ascending -> Descending` cycle
//! - [`SelectionSet`]: selected row identities
//! - [`RowKeySource`]: how rows get their identity
//! - [`build_model`]: pure mapping from all of the above to display rows + header decoration
//!
//! [`DataTable`] bundles that state; [`DataTableView`] adds cursor/focus/scroll and draws it.
pub mod bindings;
pub mod column;
pub mod compare;
pub mod data_table;
pub mod identity;
pub mod model;
pub mod selection;
pub mod sort;
pub mod value;
pub mod view;

pub use bindings::DataTableBindings;
pub use column::Column;
pub use column::ColumnAlign;
pub use data_table::DataTable;
pub use data_table::DataTableOptions;
pub use identity::RowKey;
pub use identity::RowKeySource;
pub use model::DisplayRow;
pub use model::HeaderCell;
pub use model::SortIndicator;
pub use model::TableModel;
pub use model::build_model;
pub use selection::SelectAllState;
pub use selection::SelectionSet;
pub use sort::SortConfig;
pub use sort::SortDirection;
pub use sort::SortState;
pub use value::Record;
pub use value::Row;
pub use value::Value;
pub use value::ValueRef;
pub use view::DataTableAction;
pub use view::DataTableView;
