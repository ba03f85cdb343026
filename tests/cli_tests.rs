use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{shyft, temp_home};

fn add_day_shift(home: &Path) {
    shyft(home)
        .args([
            "add", "--date", "2025-03-01", "--model", "model-a", "--project", "proj-1", "--in",
            "09:00", "--out", "17:30", "--rate", "20",
        ])
        .assert()
        .success()
        .stdout(contains("Shift 0001 logged"))
        .stdout(contains("170.00"));
}

#[test]
fn test_init_creates_data_file_and_notes_dir() {
    let home = temp_home();

    shyft(home.path())
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(home.path().join("data.json").exists());
    assert!(home.path().join("logs").is_dir());
    // test mode never writes the configuration
    assert!(!home.path().join("shyft.conf").exists());
}

#[test]
fn test_add_then_list() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("0001"))
        .stdout(contains("MODEL-A"))
        .stdout(contains("PROJ-1"))
        .stdout(contains("8.50"));
}

#[test]
fn test_list_on_empty_store() {
    let home = temp_home();
    shyft(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No shifts logged yet."));
}

#[test]
fn test_add_with_missing_fields_fails() {
    let home = temp_home();
    shyft(home.path())
        .args(["add", "--in", "09:00", "--out", "10:00", "--rate", "20"])
        .assert()
        .failure()
        .stderr(contains("Validation error"))
        .stderr(contains("model id"))
        .stderr(contains("project id"));

    assert!(!home.path().join("data.json").exists());
}

#[test]
fn test_add_with_bad_time_fails() {
    let home = temp_home();
    shyft(home.path())
        .args([
            "add", "--model", "m", "--project", "p", "--in", "25:00", "--out", "10:00", "--rate",
            "20",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_totals_output() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .arg("totals")
        .assert()
        .success()
        .stdout(contains("Shifts Worked"))
        .stdout(contains("8.50"))
        .stdout(contains("$170.00"))
        .stdout(contains("Estimated Tax Liability (27%)"))
        .stdout(contains("$45.90"))
        .stdout(contains("$124.10"));
}

#[test]
fn test_totals_on_empty_store() {
    let home = temp_home();
    shyft(home.path())
        .arg("totals")
        .assert()
        .success()
        .stdout(contains("$0.00"));
}

#[test]
fn test_edit_keeps_other_fields() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .args(["edit", "1", "--out", "13:00"])
        .assert()
        .success();

    shyft(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("0001"))
        .stdout(contains("13:00"))
        .stdout(contains("MODEL-A"))
        .stdout(contains("80.00"));
}

#[test]
fn test_edit_unknown_shift_fails() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .args(["edit", "0009", "--rate", "10"])
        .assert()
        .failure()
        .stderr(contains("Not found: shift 0009"));
}

#[test]
fn test_del_with_yes_removes_shift() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .args(["del", "0001", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    shyft(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No shifts logged yet."));
}

#[test]
fn test_del_declined_keeps_shift() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .args(["del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    shyft(home.path())
        .arg("list")
        .assert()
        .stdout(contains("0001"));
}

#[test]
fn test_del_unknown_shift_fails() {
    let home = temp_home();
    add_day_shift(home.path());

    shyft(home.path())
        .args(["del", "42", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Not found: shift 0042"));
}

#[test]
fn test_auto_finish_logs_shift_and_note() {
    let home = temp_home();

    shyft(home.path())
        .args(["auto", "--model", "m-1", "--project", "p-1", "--rate", "30"])
        .write_stdin("f\n")
        .assert()
        .success()
        .stdout(contains("Autologger shift 0001 added"));

    assert!(home.path().join("logs").join("0001.md").exists());

    shyft(home.path())
        .arg("logs")
        .assert()
        .success()
        .stdout(contains("0001.md"));

    shyft(home.path())
        .args(["logs", "--show", "0001.md"])
        .assert()
        .success()
        .stdout(contains("# `0001.md`"))
        .stdout(contains("M-1"));
}

#[test]
fn test_auto_with_prompts_task_and_note() {
    let home = temp_home();
    let input = "model-z\nproj-z\n15\n\
                 t\nplat-1\nhttps://x.test/1\nr1\nr2\n3\nsame quality\n.\n\
                 n\nfirst note\n.\n\
                 f\n";

    shyft(home.path())
        .arg("auto")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Task added (1 so far)."))
        .stdout(contains("(1 tasks)"));

    let note = fs::read_to_string(home.path().join("logs").join("0001.md")).unwrap();
    assert!(note.contains("The responses are of equal quality"));
    assert!(note.contains("first note"));

    let data = fs::read_to_string(home.path().join("data.json")).unwrap();
    assert!(data.contains("\"Tasks completed\": 1"));
    assert!(data.contains("MODEL-Z"));
}

#[test]
fn test_auto_cancel_logs_nothing() {
    let home = temp_home();

    shyft(home.path())
        .args(["auto", "--model", "m", "--project", "p", "--rate", "10"])
        .write_stdin("c\n")
        .assert()
        .success()
        .stdout(contains("nothing was logged"));

    assert!(!home.path().join("data.json").exists());
}

#[test]
fn test_auto_closed_input_cancels() {
    let home = temp_home();

    shyft(home.path())
        .args(["auto", "--model", "m", "--project", "p", "--rate", "10"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Input closed"));

    assert!(!home.path().join("data.json").exists());
}

#[test]
fn test_auto_empty_metadata_aborts() {
    let home = temp_home();

    shyft(home.path())
        .arg("auto")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("Autologger aborted."));
}

#[test]
fn test_auto_rejects_bad_rate() {
    let home = temp_home();

    shyft(home.path())
        .args(["auto", "--model", "m", "--project", "p", "--rate", "abc"])
        .write_stdin("f\n")
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn test_del_removes_note() {
    let home = temp_home();

    shyft(home.path())
        .args(["auto", "--model", "m", "--project", "p", "--rate", "10"])
        .write_stdin("f\n")
        .assert()
        .success();

    shyft(home.path())
        .args(["del", "1", "-y"])
        .assert()
        .success();

    assert!(!home.path().join("logs").join("0001.md").exists());
}

#[test]
fn test_logs_show_rejects_unknown_note() {
    let home = temp_home();
    shyft(home.path())
        .args(["logs", "--show", "../data.json"])
        .assert()
        .failure()
        .stderr(contains("Not found: note"));
}

#[test]
fn test_timer_quits_on_q() {
    let home = temp_home();
    shyft(home.path())
        .arg("timer")
        .write_stdin("\nq\n")
        .assert()
        .success()
        .stdout(contains("Total: "));
}

#[test]
fn test_export_json_and_csv() {
    let home = temp_home();
    add_day_shift(home.path());
    let json = home.path().join("out").join("shifts.json");
    let csv = home.path().join("shifts.csv");

    shyft(home.path())
        .args(["export", "--format", "json", "--file"])
        .arg(&json)
        .assert()
        .success();

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(exported[0]["id"], "0001");
    assert_eq!(exported[0]["grossPay"], "170.00");

    shyft(home.path())
        .args(["export", "--file"])
        .arg(&csv)
        .assert()
        .success();

    let text = fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("id,date,modelId"));
    assert!(text.contains("0001,2025-03-01,MODEL-A,PROJ-1"));
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let home = temp_home();
    add_day_shift(home.path());
    let out = home.path().join("shifts.csv");
    fs::write(&out, "keep").unwrap();

    shyft(home.path())
        .args(["export", "--file"])
        .arg(&out)
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("left untouched"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep");

    shyft(home.path())
        .args(["export", "--file"])
        .arg(&out)
        .write_stdin("y\n")
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("MODEL-A"));
    fs::write(&out, "keep").unwrap();

    shyft(home.path())
        .args(["export", "--force", "--file"])
        .arg(&out)
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("MODEL-A"));
}

#[test]
fn test_backup_copy_and_zip() {
    let home = temp_home();
    add_day_shift(home.path());

    let copy = home.path().join("bk").join("copy.json");
    shyft(home.path())
        .args(["backup", "--file"])
        .arg(&copy)
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert_eq!(
        fs::read(&copy).unwrap(),
        fs::read(home.path().join("data.json")).unwrap()
    );

    let zipped = home.path().join("bk").join("archive");
    shyft(home.path())
        .args(["backup", "--compress", "--file"])
        .arg(&zipped)
        .assert()
        .success();
    assert!(home.path().join("bk").join("archive.zip").exists());
}

#[test]
fn test_backup_without_data_fails() {
    let home = temp_home();
    shyft(home.path())
        .args(["backup", "--file"])
        .arg(home.path().join("x.json"))
        .assert()
        .failure()
        .stderr(contains("Data file not found"));
}

#[test]
fn test_data_override_keeps_notes_next_to_file() {
    let home = temp_home();
    let data = home.path().join("elsewhere").join("shifts.json");

    shyft(home.path())
        .args(["auto", "--model", "m", "--project", "p", "--rate", "10", "--data"])
        .arg(&data)
        .write_stdin("f\n")
        .assert()
        .success();

    assert!(data.exists());
    assert!(home.path().join("elsewhere").join("logs").join("0001.md").exists());
    assert!(!home.path().join("data.json").exists());
}

#[test]
fn test_config_print_shows_defaults() {
    let home = temp_home();
    shyft(home.path())
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("tick_millis: 100"))
        .stdout(contains("log_level: info"));
}

#[test]
fn test_config_check_reports_missing_keys() {
    let home = temp_home();
    fs::write(home.path().join("shyft.conf"), "log_level: debug\n").unwrap();

    shyft(home.path())
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing fields").and(contains("tick_millis")));
}

#[test]
fn test_malformed_config_is_an_error() {
    let home = temp_home();
    fs::write(home.path().join("shyft.conf"), "tick_millis: [not a number\n").unwrap();

    shyft(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Configuration error"));
}

#[test]
fn test_auto_note_failure_keeps_single_shift() {
    let home = temp_home();
    fs::write(home.path().join("logs"), "not a directory").unwrap();

    shyft(home.path())
        .args(["auto", "--model", "m", "--project", "p", "--rate", "10"])
        .write_stdin("f\np\nf\nc\n")
        .assert()
        .success()
        .stdout(contains("is already stored"))
        .stdout(contains("kept without a note"));

    let data = fs::read_to_string(home.path().join("data.json")).unwrap();
    assert!(data.contains("\"0001\""));
    assert!(!data.contains("\"0002\""));
}
