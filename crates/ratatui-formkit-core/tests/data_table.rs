use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_formkit_core::input::InputEvent;
use ratatui_formkit_core::input::KeyCode;
use ratatui_formkit_core::input::KeyEvent;
use ratatui_formkit_core::table::Column;
use ratatui_formkit_core::table::DataTable;
use ratatui_formkit_core::table::DataTableAction;
use ratatui_formkit_core::table::DataTableOptions;
use ratatui_formkit_core::table::DataTableView;
use ratatui_formkit_core::table::Record;
use ratatui_formkit_core::table::Row;
use ratatui_formkit_core::table::RowKey;
use ratatui_formkit_core::table::RowKeySource;
use ratatui_formkit_core::table::SelectAllState;
use ratatui_formkit_core::table::SortState;
use ratatui_formkit_core::table::Value;
use ratatui_formkit_core::table::ValueRef;
use ratatui_formkit_core::theme::Theme;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
struct User {
    id: i64,
    name: String,
    age: Option<i64>,
}

impl Record for User {
    fn field(&self, key: &str) -> Option<ValueRef<'_>> {
        match key {
            "id" => Some(ValueRef::Int(self.id)),
            "name" => Some(ValueRef::Text(&self.name)),
            "age" => Some(self.age.map_or(ValueRef::Null, ValueRef::Int)),
            _ => None,
        }
    }
}

fn users() -> Vec<User> {
    serde_json::from_str(
        r#"[
            {"id": 1, "name": "Bob", "age": 41},
            {"id": 2, "name": "Amy", "age": null},
            {"id": 3, "name": "Cid", "age": 29}
        ]"#,
    )
    .expect("users json")
}

fn user_table() -> DataTable<User> {
    let mut t = DataTable::with_options(
        vec![
            Column::new("id", "ID"),
            Column::new("name", "Name").sortable(true),
            Column::new("age", "Age").sortable(true),
        ],
        DataTableOptions {
            selectable: true,
            ..Default::default()
        },
    );
    t.set_rows(users());
    t
}

fn displayed(t: &DataTable<User>) -> Vec<String> {
    t.model().rows.iter().map(|r| r.row.name.clone()).collect()
}

fn selected(rows: &[&User]) -> Vec<String> {
    rows.iter().map(|u| u.name.clone()).collect()
}

#[test]
fn name_column_cycles_through_three_states() {
    let mut t = user_table();
    assert_eq!(displayed(&t), ["Bob", "Amy", "Cid"]);

    assert!(t.activate_column("name"));
    assert_eq!(displayed(&t), ["Amy", "Bob", "Cid"]);
    assert!(t.activate_column("name"));
    assert_eq!(displayed(&t), ["Cid", "Bob", "Amy"]);
    assert!(t.activate_column("name"));
    assert_eq!(displayed(&t), ["Bob", "Amy", "Cid"]);
    assert_eq!(*t.sort_state(), SortState::Unsorted);

    // A fourth activation starts the cycle again.
    assert!(t.activate_column("name"));
    assert_eq!(displayed(&t), ["Amy", "Bob", "Cid"]);
}

#[test]
fn switching_columns_starts_ascending() {
    let mut t = user_table();
    t.activate_column("name");
    t.activate_column("name");
    t.activate_column("age");
    assert_eq!(*t.sort_state(), SortState::Ascending("age".to_string()));
}

#[test]
fn null_ages_sort_last_in_both_directions() {
    let mut t = user_table();
    t.activate_column("age");
    assert_eq!(displayed(&t), ["Cid", "Bob", "Amy"]);
    t.activate_column("age");
    assert_eq!(displayed(&t), ["Bob", "Cid", "Amy"]);
}

#[test]
fn selection_survives_reordering() {
    let mut t = user_table();
    assert_eq!(selected(&t.toggle_row(RowKey::Int(2), true)), ["Amy"]);
    t.activate_column("name");
    assert_eq!(selected(&t.selected_rows()), ["Amy"]);
    let model = t.model();
    assert!(model.rows[0].selected);
    assert_eq!(model.selected_count, 1);
    assert_eq!(model.select_all, SelectAllState::Some);
}

#[test]
fn clear_then_select_all_returns_display_order() {
    let mut t = user_table();
    t.activate_column("name");
    t.activate_column("name");
    t.toggle_row(RowKey::Int(1), true);
    assert!(t.clear_all().is_empty());
    assert_eq!(selected(&t.select_all()), ["Cid", "Bob", "Amy"]);
    assert!(t.all_selected());
    assert!(!t.some_selected());
}

#[test]
fn select_all_only_covers_displayed_rows() {
    let mut t = user_table();
    let kept: Vec<User> = users().into_iter().filter(|u| u.id != 3).collect();
    t.set_rows(kept);
    t.select_all();
    assert_eq!(t.selection().len(), 2);
    assert!(!t.selection().contains(&RowKey::Int(3)));
    assert_eq!(t.select_all_state(), SelectAllState::All);
}

#[test]
fn function_row_keys_are_used_verbatim() {
    let mut t: DataTable<User> = DataTable::with_options(
        vec![Column::new("name", "Name").sortable(true)],
        DataTableOptions {
            selectable: true,
            row_key: RowKeySource::func(|u: &User, _| RowKey::Text(u.name.to_lowercase())),
            ..Default::default()
        },
    );
    t.set_rows(users());
    t.toggle_row(RowKey::Text("cid".to_string()), true);
    assert_eq!(selected(&t.selected_rows()), ["Cid"]);
}

#[test]
fn json_rows_without_ids_fall_back_to_position() {
    let rows: Vec<Row> =
        serde_json::from_str(r#"[{"name": "Bob"}, {"name": "Amy"}]"#).expect("rows json");
    let mut t = DataTable::with_options(
        vec![Column::new("name", "Name").sortable(true)],
        DataTableOptions {
            selectable: true,
            ..Default::default()
        },
    );
    t.set_rows(rows);
    t.toggle_row(RowKey::Int(0), true);
    let first: Vec<&str> = t
        .selected_rows()
        .iter()
        .filter_map(|r| r.text("name").ok())
        .collect();
    assert_eq!(first, ["Bob"]);

    // Position 0 now belongs to another row.
    t.activate_column("name");
    let after: Vec<&str> = t
        .selected_rows()
        .iter()
        .filter_map(|r| r.text("name").ok())
        .collect();
    assert_eq!(after, ["Amy"]);
}

#[test]
fn scores_with_nan_sort_through_the_model() {
    let mut rng = StdRng::seed_from_u64(42);
    let rows: Vec<Row> = (0..100)
        .map(|i| {
            let score = if rng.random_range(0..5) == 0 {
                f64::NAN
            } else {
                rng.random_range(-1000.0..1000.0)
            };
            Row::new().with("id", i + 1).with("score", score)
        })
        .collect();
    let mut t = DataTable::with_options(
        vec![Column::new("score", "Score").sortable(true)],
        DataTableOptions {
            selectable: true,
            ..Default::default()
        },
    );
    t.set_rows(rows);

    for _ in 0..2 {
        assert!(t.activate_column("score"));
        let scores: Vec<f64> = t
            .model()
            .rows
            .iter()
            .map(|r| match r.row.get("score") {
                Some(Value::Float(f)) => *f,
                other => panic!("unexpected score {other:?}"),
            })
            .collect();
        assert_eq!(scores.len(), 100);
        let numbers = scores.iter().take_while(|f| !f.is_nan()).count();
        // NaN behaves like a missing value: after every number, in both directions.
        assert!(scores[numbers..].iter().all(|f| f.is_nan()));
        let ascending = matches!(t.sort_state(), SortState::Ascending(_));
        assert!(scores[..numbers].windows(2).all(|w| if ascending {
            w[0] <= w[1]
        } else {
            w[0] >= w[1]
        }));
    }

    assert_eq!(t.select_all().len(), 100);
    assert!(t.all_selected());
}

#[test]
fn mixed_kinds_sort_numbers_then_bools_then_text() {
    let rows: Vec<Row> = serde_json::from_str(
        r#"[
            {"id": 1, "v": "9"},
            {"id": 2, "v": 10},
            {"id": 3, "v": true},
            {"id": 4, "v": null},
            {"id": 5, "v": 9},
            {"id": 6, "v": "apple"},
            {"id": 7, "v": 2.5}
        ]"#,
    )
    .expect("rows json");
    let mut t = DataTable::new(vec![Column::new("v", "V").sortable(true)]);
    t.set_rows(rows);
    let ids = |t: &DataTable<Row>| -> Vec<i64> {
        t.model()
            .rows
            .iter()
            .map(|r| r.row.int("id").expect("id"))
            .collect()
    };
    t.activate_column("v");
    assert_eq!(ids(&t), [7, 5, 2, 3, 1, 6, 4]);
    t.activate_column("v");
    assert_eq!(ids(&t), [6, 1, 3, 2, 5, 7, 4]);
}

#[test]
fn view_sorts_and_selects_from_keys() {
    let mut v = DataTableView::with_options(
        vec![
            Column::new("name", "Name").sortable(true),
            Column::new("age", "Age"),
        ],
        DataTableOptions {
            selectable: true,
            show_scrollbar: false,
            ..Default::default()
        },
    );
    v.set_rows(users());
    v.set_cursor(Some(0));

    let key = |code| InputEvent::Key(KeyEvent::new(code));
    assert_eq!(
        v.handle_event(key(KeyCode::Char('s'))),
        DataTableAction::SortChanged
    );
    // The cursor follows Bob to his sorted position.
    assert_eq!(v.cursor(), Some(1));
    assert_eq!(
        v.handle_event(key(KeyCode::Char(' '))),
        DataTableAction::SelectionChanged
    );
    assert_eq!(selected(&v.selected_rows()), ["Bob"]);

    let area = Rect::new(0, 0, 24, 4);
    let mut buf = Buffer::empty(area);
    v.render(area, &mut buf, &Theme::default());
    let lines: Vec<String> = (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect();
    assert!(lines[0].starts_with("[-]"));
    assert!(lines[0].contains("Name ▲"));
    assert!(lines[1].contains("Amy"));
    assert!(lines[2].starts_with("[x]"));
    assert!(lines[2].contains("Bob"));
    assert!(lines[3].contains("Cid"));
}
