#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use shyft::archive::LogArchive;
use shyft::models::ShiftFields;
use shyft::store::ShiftStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Binary under test, isolated in `home`.
pub fn shyft(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("shyft");
    cmd.env("SHYFT_HOME", home).env_remove("RUST_LOG");
    cmd
}

pub fn temp_home() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

pub fn data_file(dir: &Path) -> PathBuf {
    dir.join("data.json")
}

pub fn notes_dir(dir: &Path) -> PathBuf {
    dir.join("logs")
}

/// Store laid out like an installation rooted at `dir`.
pub fn open_store(dir: &Path) -> ShiftStore {
    ShiftStore::open(data_file(dir), LogArchive::new(notes_dir(dir)))
}

pub fn fields(
    date: &str,
    model: &str,
    project: &str,
    time_in: &str,
    time_out: &str,
    rate: &str,
) -> ShiftFields {
    ShiftFields {
        date: date.into(),
        model_id: model.into(),
        project_id: project.into(),
        time_in: time_in.into(),
        time_out: time_out.into(),
        hourly_rate: rate.into(),
    }
}

pub fn day_shift() -> ShiftFields {
    fields("2025-03-01", "model-a", "proj-1", "09:00", "17:30", "20")
}
