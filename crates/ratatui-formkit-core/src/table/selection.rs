use crate::table::identity::RowKey;
use log::trace;
use std::collections::HashSet;

/// State of a header-level "select all" checkbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectAllState {
    #[default]
    None,
    /// Some but not all rows are selected; drawn as an indeterminate checkbox.
    Some,
    All,
}

/// The set of selected row identities.
///
/// The set only stores keys. Every query takes the rows currently on screen, so answers always
/// reflect the present display order and stale keys (rows that were filtered out or replaced)
/// never show up as selected rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: HashSet<RowKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (`included == true`) or removes `key`.
    pub fn toggle_row(&mut self, key: RowKey, included: bool) {
        trace!("selection: toggle {key} -> {included}");
        if included {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    /// Replaces the set with exactly the given (displayed) keys.
    pub fn select_all<'k>(&mut self, displayed: impl IntoIterator<Item = &'k RowKey>) {
        self.keys = displayed.into_iter().cloned().collect();
        trace!("selection: select all ({} keys)", self.keys.len());
    }

    pub fn clear_all(&mut self) {
        trace!("selection: clear");
        self.keys.clear();
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Number of stored keys, including keys with no displayed row.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.keys.iter()
    }

    /// Keeps the displayed items whose key is selected, in display order.
    pub fn selected_rows<'k, T>(
        &self,
        displayed: impl IntoIterator<Item = (&'k RowKey, T)>,
    ) -> Vec<T> {
        displayed
            .into_iter()
            .filter(|(key, _)| self.keys.contains(*key))
            .map(|(_, item)| item)
            .collect()
    }

    /// `true` when the set is non-empty and as large as the displayed row count.
    pub fn all_selected(&self, displayed_count: usize) -> bool {
        !self.keys.is_empty() && self.keys.len() == displayed_count
    }

    /// `true` when the set is non-empty and smaller than the displayed row count.
    pub fn some_selected(&self, displayed_count: usize) -> bool {
        !self.keys.is_empty() && self.keys.len() < displayed_count
    }

    pub fn select_all_state(&self, displayed_count: usize) -> SelectAllState {
        if self.all_selected(displayed_count) {
            SelectAllState::All
        } else if self.some_selected(displayed_count) {
            SelectAllState::Some
        } else {
            SelectAllState::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ids: &[i64]) -> Vec<RowKey> {
        ids.iter().copied().map(RowKey::from).collect()
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut s = SelectionSet::new();
        s.toggle_row(RowKey::from(2), true);
        s.toggle_row(RowKey::from(2), true);
        assert_eq!(s.len(), 1);
        s.toggle_row(RowKey::from(2), false);
        s.toggle_row(RowKey::from(9), false);
        assert!(s.is_empty());
    }

    #[test]
    fn select_all_replaces_with_displayed_keys() {
        let mut s = SelectionSet::new();
        s.toggle_row(RowKey::from(99), true);
        let shown = keys(&[3, 1]);
        s.select_all(&shown);
        assert!(s.contains(&RowKey::from(1)));
        assert!(!s.contains(&RowKey::from(99)));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn tri_state_tracks_counts() {
        let shown = keys(&[1, 2, 3]);
        let mut s = SelectionSet::new();
        assert_eq!(s.select_all_state(shown.len()), SelectAllState::None);
        s.toggle_row(RowKey::from(2), true);
        assert!(s.some_selected(shown.len()));
        assert!(!s.all_selected(shown.len()));
        assert_eq!(s.select_all_state(shown.len()), SelectAllState::Some);
        s.select_all(&shown);
        assert!(s.all_selected(shown.len()));
        assert!(!s.some_selected(shown.len()));
        assert_eq!(s.select_all_state(shown.len()), SelectAllState::All);
        assert!(!SelectionSet::new().all_selected(0));
    }

    #[test]
    fn selected_rows_follow_display_order_and_skip_stale_keys() {
        let shown = keys(&[3, 1, 2]);
        let labels = ["c", "a", "b"];
        let mut s = SelectionSet::new();
        s.toggle_row(RowKey::from(1), true);
        s.toggle_row(RowKey::from(3), true);
        s.toggle_row(RowKey::from(42), true);
        let picked = s.selected_rows(shown.iter().zip(labels));
        assert_eq!(picked, vec!["c", "a"]);
    }

    #[test]
    fn clear_then_select_all_round_trips_display_order() {
        let shown = keys(&[5, 4, 6]);
        let mut s = SelectionSet::new();
        s.toggle_row(RowKey::from(4), true);
        s.clear_all();
        s.select_all(&shown);
        let picked = s.selected_rows(shown.iter().map(|k| (k, k.clone())));
        assert_eq!(picked, shown);
    }
}
