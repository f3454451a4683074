use crate::table::column::Column;
use crate::table::compare::compare_rows;
use crate::table::value::Record;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort, if any: one column key and its direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig<'a> {
    pub key: &'a str,
    pub direction: SortDirection,
}

/// Which column the table is sorted by.
///
/// Activating a column walks `Unsorted -> Ascending -> Descending -> Unsorted`; activating a
/// different column always restarts at `Ascending`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending(String),
    Descending(String),
}

impl SortState {
    /// The state after activating the column `key`.
    pub fn next(&self, key: &str) -> SortState {
        match self {
            SortState::Ascending(k) if k == key => SortState::Descending(key.to_string()),
            SortState::Descending(k) if k == key => SortState::Unsorted,
            _ => SortState::Ascending(key.to_string()),
        }
    }

    /// Advances the cycle for `column`. Non-sortable columns leave the state untouched and
    /// return `false`.
    pub fn activate<R>(&mut self, column: &Column<R>) -> bool {
        if !column.is_sortable() {
            debug!("sort: ignoring non-sortable column {:?}", column.key());
            return false;
        }
        let next = self.next(column.key());
        debug!("sort: {self:?} -> {next:?}");
        *self = next;
        true
    }

    pub fn config(&self) -> Option<SortConfig<'_>> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(key) => Some(SortConfig {
                key,
                direction: SortDirection::Ascending,
            }),
            SortState::Descending(key) => Some(SortConfig {
                key,
                direction: SortDirection::Descending,
            }),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.config().map(|c| c.key)
    }

    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.config()
            .filter(|c| c.key == key)
            .map(|c| c.direction)
    }

    pub fn is_unsorted(&self) -> bool {
        matches!(self, SortState::Unsorted)
    }
}

/// Returns the source indices of `rows` in display order.
///
/// The sort is stable: rows that compare equal keep their input order. With no active sort this
/// is the identity permutation.
pub fn sorted_indices<R: Record>(rows: &[R], sort: &SortState) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    if let Some(SortConfig { key, direction }) = sort.config() {
        order.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], key, direction));
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::value::Row;
    use crate::table::value::Value;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cmp::Ordering;

    fn people() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "Bob").with("team", "x"),
            Row::new().with("id", 2).with("name", "Amy").with("team", "y"),
            Row::new().with("id", 3).with("name", "Cid").with("team", "x"),
        ]
    }

    fn names(rows: &[Row], order: &[usize]) -> Vec<String> {
        order
            .iter()
            .map(|&i| rows[i].text("name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn three_activations_return_to_unsorted_and_cycle_repeats() {
        let name: Column<Row> = Column::new("name", "Name").sortable(true);
        let mut s = SortState::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            assert!(s.activate(&name));
            seen.push(s.clone());
        }
        assert_eq!(seen[0], SortState::Ascending("name".into()));
        assert_eq!(seen[1], SortState::Descending("name".into()));
        assert_eq!(seen[2], SortState::Unsorted);
        assert_eq!(seen[..3], seen[3..]);
    }

    #[test]
    fn switching_columns_restarts_at_ascending() {
        assert_eq!(
            SortState::Descending("name".into()).next("id"),
            SortState::Ascending("id".into())
        );
        assert_eq!(
            SortState::Ascending("name".into()).next("id"),
            SortState::Ascending("id".into())
        );
    }

    #[test]
    fn non_sortable_column_is_a_no_op() {
        let team: Column<Row> = Column::new("team", "Team");
        let mut s = SortState::Ascending("name".into());
        assert!(!s.activate(&team));
        assert_eq!(s, SortState::Ascending("name".into()));
    }

    #[test]
    fn orders_follow_the_cycle() {
        let rows = people();
        let mut s = SortState::default();
        let name: Column<Row> = Column::new("name", "Name").sortable(true);

        s.activate(&name);
        assert_eq!(names(&rows, &sorted_indices(&rows, &s)), ["Amy", "Bob", "Cid"]);
        s.activate(&name);
        assert_eq!(names(&rows, &sorted_indices(&rows, &s)), ["Cid", "Bob", "Amy"]);
        s.activate(&name);
        assert_eq!(names(&rows, &sorted_indices(&rows, &s)), ["Bob", "Amy", "Cid"]);
        assert!(s.is_unsorted());
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let rows = people();
        let asc = sorted_indices(&rows, &SortState::Ascending("team".into()));
        assert_eq!(asc, vec![0, 2, 1]);
        let desc = sorted_indices(&rows, &SortState::Descending("team".into()));
        assert_eq!(desc, vec![1, 0, 2]);
    }

    #[test]
    fn resorting_sorted_rows_is_idempotent() {
        let rows = people();
        let s = SortState::Descending("name".into());
        let once: Vec<Row> = sorted_indices(&rows, &s)
            .into_iter()
            .map(|i| rows[i].clone())
            .collect();
        assert_eq!(sorted_indices(&once, &s), vec![0, 1, 2]);
    }

    #[test]
    fn config_exposes_key_and_direction() {
        let s = SortState::Descending("age".into());
        assert_eq!(
            s.config(),
            Some(SortConfig {
                key: "age",
                direction: SortDirection::Descending
            })
        );
        assert_eq!(s.direction_for("age"), Some(SortDirection::Descending));
        assert_eq!(s.direction_for("name"), None);
        assert_eq!(SortState::Unsorted.key(), None);
    }

    const TEXTS: [&str; 6] = ["9", "10", "a", "A", "b", ""];

    fn mixed_rows(seed: u64, len: usize) -> Vec<Row> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len)
            .map(|i| {
                let row = Row::new().with("id", i as i64);
                let score = match rng.random_range(0..7u8) {
                    0 => return row,
                    1 => Value::Null,
                    2 => Value::Float(f64::NAN),
                    3 => Value::Int(rng.random_range(-20..20)),
                    4 => Value::Float(rng.random_range(-20.0..20.0)),
                    5 => Value::Bool(rng.random_bool(0.5)),
                    _ => Value::from(TEXTS[rng.random_range(0..TEXTS.len())]),
                };
                row.with("score", score)
            })
            .collect()
    }

    fn sorts_last(row: &Row) -> bool {
        match row.get("score") {
            None | Some(Value::Null) => true,
            Some(Value::Float(f)) => f.is_nan(),
            Some(_) => false,
        }
    }

    #[test]
    fn mixed_columns_sort_without_panicking_and_stay_ordered() {
        for seed in 0..8 {
            let rows = mixed_rows(seed, 200);
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let state = match direction {
                    SortDirection::Ascending => SortState::Ascending("score".into()),
                    SortDirection::Descending => SortState::Descending("score".into()),
                };
                let order = sorted_indices(&rows, &state);

                let mut seen = order.clone();
                seen.sort_unstable();
                assert_eq!(seen, (0..rows.len()).collect::<Vec<_>>());

                for pair in order.windows(2) {
                    let (a, b) = (&rows[pair[0]], &rows[pair[1]]);
                    match compare_rows(a, b, "score", direction) {
                        Ordering::Less => {}
                        Ordering::Equal => assert!(pair[0] < pair[1], "ties keep input order"),
                        Ordering::Greater => panic!("out of order at {pair:?} (seed {seed})"),
                    }
                }

                let first_absent = order
                    .iter()
                    .position(|&i| sorts_last(&rows[i]))
                    .unwrap_or(order.len());
                assert!(order[first_absent..].iter().all(|&i| sorts_last(&rows[i])));
            }
        }
    }
}
