use std::cell::RefCell;
use std::rc::Rc;

use datatable_lib::{CheckState, Column, DataTable, EventResult, Record, Row, RowIdentity};

fn user(id: i64, name: &str) -> Record {
    Record::new().set("id", id).set("name", name)
}

/// 25 users, 10 per page, keyed by their `id` field.
fn users_table() -> DataTable<Record> {
    let rows = (1..=25).map(|i| user(i, &format!("user {:02}", i))).collect();
    DataTable::new(vec![
        Column::new("id", "ID").sortable(),
        Column::new("name", "Name").sortable(),
    ])
    .with_rows(rows)
    .with_page_size(10)
    .with_identity(RowIdentity::field("id"))
}

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.field("id").unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Toggle all
// ============================================================================

#[test]
fn test_toggle_all_selects_current_page_only() {
    let mut table = users_table();
    table.go_to_page(2);
    assert_eq!(table.toggle_all(), EventResult::Consumed);

    assert!(table.all_selected());
    assert_eq!(table.selected_keys().len(), 10);
    assert_eq!(ids(&table.selected_rows()).first().map(String::as_str), Some("11"));
}

#[test]
fn test_toggle_all_on_other_page_keeps_selections() {
    let mut table = users_table();
    table.go_to_page(2);
    table.toggle_all();
    let page_two = table.selected_keys();

    table.go_to_page(1);
    table.toggle_all();
    assert_eq!(table.selected_keys().len(), 20);

    table.toggle_all();
    assert_eq!(table.selected_keys(), page_two);

    table.go_to_page(2);
    assert!(table.all_selected());
}

#[test]
fn test_toggle_all_completes_partial_page() {
    let mut table = users_table();
    table.toggle_select_at(0);
    table.toggle_select_at(3);
    assert_eq!(table.header_state(), CheckState::Indeterminate);

    table.toggle_all();
    assert_eq!(table.header_state(), CheckState::Checked);
    assert_eq!(table.selected_keys().len(), 10);
}

#[test]
fn test_toggle_all_on_empty_page_is_ignored() {
    let mut table = users_table();
    table.set_query("nobody");
    assert_eq!(table.toggle_all(), EventResult::Ignored);
    assert!(!table.all_selected());
    assert!(!table.some_selected());
    assert_eq!(table.header_state(), CheckState::Unchecked);
}

// ============================================================================
// Tri-state header
// ============================================================================

#[test]
fn test_header_state_follows_current_page() {
    let mut table = users_table();
    assert_eq!(table.header_state(), CheckState::Unchecked);

    table.toggle_select_at(2);
    assert!(table.some_selected());
    assert!(!table.all_selected());
    assert_eq!(table.header_state(), CheckState::Indeterminate);

    table.go_to_page(3);
    assert!(!table.some_selected());
    assert_eq!(table.header_state(), CheckState::Unchecked);

    table.toggle_all();
    assert_eq!(table.page_rows().len(), 5);
    assert_eq!(table.header_state(), CheckState::Checked);
}

// ============================================================================
// Persistence across view changes
// ============================================================================

#[test]
fn test_selection_survives_filter_and_sort() {
    let mut table = users_table();
    table.toggle_select_at(0);
    let key = table.selected_keys();
    assert_eq!(key, ["1"]);

    table.set_query("user 2");
    assert!(!table.some_selected());
    assert_eq!(table.selected_keys(), key);

    table.set_query("");
    table.toggle_sort("id");
    table.toggle_sort("id");
    table.last_page();
    assert!(table.is_selected_at(table.page_rows().len() - 1));
}

#[test]
fn test_selection_survives_row_replacement_with_field_identity() {
    let mut table = users_table();
    table.toggle_select_at(4);
    assert_eq!(table.selected_keys(), ["5"]);

    let mut rows: Vec<Record> = table.rows().to_vec();
    rows.reverse();
    table.set_rows(rows);

    assert_eq!(ids(&table.selected_rows()), ["5"]);
    let selected = table.rows().iter().filter(|r| table.is_selected(r)).count();
    assert_eq!(selected, 1);
}

#[test]
fn test_stale_keys_are_harmless() {
    let mut table = users_table();
    table.toggle_key("999");
    assert_eq!(table.selected_keys(), ["999"]);
    assert!(table.selected_rows().is_empty());
    assert!(!table.some_selected());
}

#[test]
fn test_toggle_select_by_row() {
    let mut table = users_table();
    let outside = user(7, "user 07");
    table.toggle_select(&outside);
    assert!(table.is_selected_at(6));
    table.toggle_select(&outside);
    assert!(!table.is_selected_at(6));
}

#[test]
fn test_key_of_row_from_table() {
    let mut table = users_table();
    let key = table.key_of(table.page_rows()[1]).unwrap();
    assert_eq!(key, "2");
    table.toggle_key(&key);
    assert!(table.is_selected_at(1));
}

#[test]
fn test_clear_selection() {
    let mut table = users_table();
    assert_eq!(table.clear_selection(), EventResult::Ignored);
    table.toggle_all();
    table.go_to_page(2);
    table.toggle_all();
    assert_eq!(table.clear_selection(), EventResult::Consumed);
    assert!(table.selected_keys().is_empty());
}

// ============================================================================
// Default identity
// ============================================================================

#[test]
fn test_position_identity() {
    let rows = vec![user(1, "a"), user(2, "b"), user(3, "c")];
    let mut table = DataTable::new(vec![Column::new("name", "Name").sortable()]).with_rows(rows);
    table.toggle_sort("name");
    table.toggle_sort("name");
    // Descending: c, b, a. The first visible row is position 2.
    table.toggle_select_at(0);
    assert_eq!(table.selected_keys(), ["#2"]);

    let row = table.page_rows()[0];
    assert!(table.is_selected(row));
}

#[test]
fn test_position_identity_needs_a_row_from_the_table() {
    let rows = vec![user(1, "a"), user(2, "b"), user(3, "c")];
    let mut table = DataTable::new(vec![Column::new("name", "Name")]).with_rows(rows);

    let copy = table.rows()[0].clone();
    assert_eq!(table.key_of(&copy), None);
    assert_eq!(table.toggle_select(&copy), EventResult::Ignored);
    assert!(table.selected_keys().is_empty());
    assert!(!table.is_selected(&copy));
    assert!(!table.is_selected_at(0));

    let mut rows = table.rows().to_vec();
    rows.push(user(4, "d"));
    table.set_rows(rows);
    assert!(table.selected_rows().is_empty());
}

#[test]
fn test_position_identity_with_shared_rows() {
    let rows: Vec<Rc<Record>> = vec![
        Rc::new(user(1, "a")),
        Rc::new(user(2, "b")),
        Rc::new(user(3, "c")),
    ];
    let mut table = DataTable::new(vec![Column::new("name", "Name")]).with_rows(rows);

    let first = Rc::clone(&table.rows()[0]);
    assert_eq!(table.toggle_select(&first), EventResult::Consumed);
    assert_eq!(table.selected_keys(), ["#0"]);
    assert!(table.is_selected(&first));
    assert!(table.is_selected_at(0));

    let stranger = Rc::new(user(1, "a"));
    assert_eq!(table.toggle_select(&stranger), EventResult::Ignored);
    assert_eq!(table.selected_keys(), ["#0"]);
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_selection_change_carries_all_selected_rows() {
    let events: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
    let mut table = users_table();
    let sink = Rc::clone(&events);
    table.on_selection_change(move |rows| {
        let ids: Vec<String> = rows
            .iter()
            .map(|r| r.field("id").unwrap_or_default().to_string())
            .collect();
        sink.borrow_mut().push(ids);
    });

    table.toggle_select_at(1);
    table.go_to_page(3);
    table.toggle_select_at(0);
    table.toggle_key("2");

    assert_eq!(
        *events.borrow(),
        vec![
            vec!["2".to_string()],
            vec!["2".to_string(), "21".to_string()],
            vec!["21".to_string()],
        ]
    );
}
