use shyft::models::ShiftId;
use std::fs;

mod common;
use common::{data_file, day_shift, open_store, temp_home};

fn reload_raw(dir: &std::path::Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(data_file(dir)).unwrap()).unwrap()
}

#[test]
fn test_positional_rows_are_converted_and_rewritten() {
    let dir = temp_home();
    fs::write(
        data_file(dir.path()),
        r#"[
            ["0001", "2024-11-02", "M1", "P1", "09:00", "17:00", "8.00", "20.00", "160.00"],
            ["0002", "2024-11-03", "M2", "P2", "22:00", "02:00", "4.00", "25.00", "100.00", "3"]
        ]"#,
    )
    .unwrap();

    let store = open_store(dir.path());
    let records = store.list();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, ShiftId::new(1));
    assert_eq!(records[0].model_id, "M1");
    assert_eq!(records[0].gross_pay.as_str(), "160.00");
    assert_eq!(records[0].tasks_completed, None);
    assert_eq!(records[1].time_out, "02:00");
    assert_eq!(records[1].tasks_completed, Some(3));

    let raw = reload_raw(dir.path());
    assert!(raw.is_object(), "file should now be id-keyed");
    assert_eq!(raw["data"]["0002"]["Project ID"], "P2");
    assert_eq!(raw["data"]["0002"]["Tasks completed"], 3);
}

#[test]
fn test_header_keyed_rows_with_task_lists() {
    let dir = temp_home();
    fs::write(
        data_file(dir.path()),
        r#"[
            {"ID": "0005", "Date": "2024-12-01", "Model ID": "M", "Project ID": "P",
             "In (hh:mm)": "08:00", "Out (hh:mm)": "12:00", "Duration (hrs)": "4.00",
             "Hourly rate": "10.00", "Gross pay": "40.00",
             "Tasks": [{"Platform ID": "a"}, {"Platform ID": "b"}]},
            {"ID": "0006", "Date": "2024-12-02", "Model ID": "M", "Project ID": "P",
             "Tasks": "[{\"x\": 1}]"}
        ]"#,
    )
    .unwrap();

    let store = open_store(dir.path());

    assert_eq!(store.get(ShiftId::new(5)).unwrap().tasks_completed, Some(2));
    assert_eq!(store.get(ShiftId::new(6)).unwrap().tasks_completed, Some(1));
    assert_eq!(store.create(&day_shift()).unwrap().id, ShiftId::new(7));
}

#[test]
fn test_rows_without_usable_id_get_fresh_ids() {
    let dir = temp_home();
    fs::write(
        data_file(dir.path()),
        r#"[
            {"ID": "0003", "Date": "a"},
            {"ID": "0003", "Date": "duplicate"},
            {"Date": "no id"},
            42
        ]"#,
    )
    .unwrap();

    let store = open_store(dir.path());
    let dates: Vec<(String, String)> = store
        .list()
        .into_iter()
        .map(|r| (r.id.to_string(), r.date))
        .collect();

    assert_eq!(
        dates,
        vec![
            ("0003".to_string(), "a".to_string()),
            ("0004".to_string(), "duplicate".to_string()),
            ("0005".to_string(), "no id".to_string()),
        ]
    );
}

#[test]
fn test_keyed_document_with_bad_keys_is_renumbered() {
    let dir = temp_home();
    fs::write(
        data_file(dir.path()),
        r#"{"data": {"0002": {"Date": "x"}, "oops": {"Date": "y"}}}"#,
    )
    .unwrap();

    let store = open_store(dir.path());
    assert_eq!(store.get(ShiftId::new(3)).unwrap().date, "y");

    let raw = reload_raw(dir.path());
    assert!(raw["data"].get("oops").is_none());
    assert_eq!(raw["data"]["0003"]["Date"], "y");
}

#[test]
fn test_placeholder_task_counts_mean_not_recorded() {
    let dir = temp_home();
    fs::write(
        data_file(dir.path()),
        r#"{"data": {
            "0001": {"Date": "x", "Tasks completed": "N/A"},
            "0002": {"Date": "y", "Tasks completed": "4"},
            "0003": {"Date": "z", "Tasks completed": 2}
        }}"#,
    )
    .unwrap();

    let store = open_store(dir.path());
    assert_eq!(store.get(ShiftId::new(1)).unwrap().tasks_completed, None);
    assert_eq!(store.get(ShiftId::new(2)).unwrap().tasks_completed, Some(4));
    assert_eq!(store.get(ShiftId::new(3)).unwrap().tasks_completed, Some(2));
}

#[test]
fn test_canonical_file_is_not_rewritten_on_load() {
    let dir = temp_home();
    let original = "{\"data\": {\"0001\": {\"Date\": \"x\"}}}";
    fs::write(data_file(dir.path()), original).unwrap();

    let store = open_store(dir.path());
    assert_eq!(store.len(), 1);
    assert_eq!(fs::read_to_string(data_file(dir.path())).unwrap(), original);
}
