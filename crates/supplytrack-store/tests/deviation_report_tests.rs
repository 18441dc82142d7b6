// Integration tests for the deviation report

use chrono::NaiveDate;
use supplytrack_core::{NewOrder, NewPart};
use supplytrack_store::OrderStore;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add_order(store: &mut OrderStore, name: &str) -> i64 {
    store
        .add_order(&NewOrder::new(name, "C", date("2024-01-01"), "S"))
        .unwrap()
}

fn add_part(store: &mut OrderStore, order_id: i64, name: &str, planned: &str, actual: &str) {
    store
        .add_part(
            &NewPart::new(order_id, name, "Sup", date(planned)).with_actual_date(date(actual)),
        )
        .unwrap();
}

#[test]
fn test_report_omits_orders_without_parts() {
    let mut store = OrderStore::open_in_memory().unwrap();
    let with_parts = add_order(&mut store, "WithParts");
    add_order(&mut store, "Empty");
    add_part(&mut store, with_parts, "P1", "2024-01-01", "2024-01-31");

    let report = store.deviation_report().unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].order_name, "WithParts");
    assert_eq!(report[0].parts[0].part_name, "P1");
    assert_eq!(report[0].parts[0].deviation, 1.0);
}

#[test]
fn test_report_groups_by_order_name() {
    let mut store = OrderStore::open_in_memory().unwrap();
    let first = add_order(&mut store, "Shared");
    let other = add_order(&mut store, "Other");
    let second = add_order(&mut store, "Shared");
    add_part(&mut store, first, "A", "2024-01-01", "2024-01-16");
    add_part(&mut store, other, "B", "2024-01-01", "2024-01-01");
    add_part(&mut store, second, "C", "2024-01-01", "2024-03-01");

    let report = store.deviation_report().unwrap();

    let names: Vec<&str> = report.iter().map(|g| g.order_name.as_str()).collect();
    assert_eq!(names, vec!["Shared", "Other"]);

    let shared: Vec<(&str, f64)> = report[0]
        .parts
        .iter()
        .map(|p| (p.part_name.as_str(), p.deviation))
        .collect();
    assert_eq!(shared, vec![("A", 0.5), ("C", 2.0)]);
    assert_eq!(report[1].parts[0].deviation, 0.0);
}

#[test]
fn test_report_drops_order_after_its_last_part_is_deleted() {
    let mut store = OrderStore::open_in_memory().unwrap();
    let order_id = add_order(&mut store, "O1");
    add_part(&mut store, order_id, "P1", "2024-01-01", "2024-01-31");
    let part_id = store.list_parts(order_id).unwrap()[0].id;

    store.delete_part(part_id).unwrap();

    assert!(store.deviation_report().unwrap().is_empty());
}
