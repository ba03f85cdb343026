//! Shift store: the id → record map and its JSON file.
//!
//! The store is the only writer of the data file. Every mutation runs
//! validate → lock → modify → persist; when persisting fails the in-memory
//! map is put back so a failed call leaves the store as it was.

pub mod document;
pub mod handle;

pub use handle::StoreHandle;

use crate::archive::LogArchive;
use crate::errors::{AppError, AppResult};
use crate::models::{ShiftFields, ShiftId, ShiftRecord, Totals, ValidShift};
use document::Shape;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

type RecordMap = BTreeMap<ShiftId, ShiftRecord>;

pub struct ShiftStore {
    path: PathBuf,
    archive: LogArchive,
    records: Mutex<RecordMap>,
}

impl ShiftStore {
    /// Open the store backed by `path` and load it.
    pub fn open(path: impl Into<PathBuf>, archive: LogArchive) -> Self {
        let store = Self {
            path: path.into(),
            archive,
            records: Mutex::new(BTreeMap::new()),
        };
        store.load_all();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn archive(&self) -> &LogArchive {
        &self.archive
    }

    fn lock(&self) -> MutexGuard<'_, RecordMap> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-read the data file and return every record ordered by id.
    ///
    /// A missing file yields an empty store. An unreadable or malformed file
    /// is reported with a warning and also yields an empty store.
    pub fn load_all(&self) -> Vec<ShiftRecord> {
        let loaded = match self.read_file() {
            Ok(records) => records,
            Err(e) => {
                warn!(file = %self.path.display(), error = %e, "starting with an empty shift store");
                BTreeMap::new()
            }
        };

        let mut guard = self.lock();
        *guard = loaded;
        guard.values().cloned().collect()
    }

    fn read_file(&self) -> AppResult<RecordMap> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %self.path.display(), "data file does not exist yet");
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(AppError::Load(e.to_string())),
        };

        let decoded = document::decode(&bytes)?;
        debug!(
            file = %self.path.display(),
            count = decoded.records.len(),
            "shifts loaded"
        );

        if decoded.needs_rewrite() {
            if decoded.shape == Shape::Legacy {
                info!(file = %self.path.display(), "converting legacy shift list to the id-keyed format");
            }
            if decoded.renumbered > 0 {
                info!(count = decoded.renumbered, "assigned new ids to records without a valid id");
            }
            if let Err(e) = self.persist(&decoded.records) {
                warn!(error = %e, "converted shifts could not be written back");
            }
        }

        Ok(decoded.records)
    }

    /// Replace the data file with the given records.
    fn persist(&self, records: &RecordMap) -> AppResult<()> {
        let bytes = document::encode(records)?;

        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, &bytes)?;
            fs::rename(&tmp, &self.path)
        };

        write().map_err(|e| AppError::Persistence(format!("{}: {e}", self.path.display())))?;
        debug!(file = %self.path.display(), count = records.len(), "shifts saved");
        Ok(())
    }

    /// Rewrite the data file from the in-memory records.
    pub fn save(&self) -> AppResult<()> {
        let guard = self.lock();
        self.persist(&guard)
    }

    /// Records ordered by id.
    pub fn list(&self) -> Vec<ShiftRecord> {
        self.lock().values().cloned().collect()
    }

    pub fn get(&self, id: ShiftId) -> AppResult<ShiftRecord> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("shift {id}")))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Validate `fields`, compute duration and pay, assign the next id and
    /// persist.
    pub fn create(&self, fields: &ShiftFields) -> AppResult<ShiftRecord> {
        let valid = fields.validate()?;
        let hours = valid.duration_hours();
        self.insert_new(&valid, hours, None)
    }

    /// Like [`create`](Self::create) but the worked time comes from a
    /// stopwatch instead of the in/out times.
    pub fn create_timed(
        &self,
        fields: &ShiftFields,
        worked_minutes: i64,
        tasks_completed: Option<u32>,
    ) -> AppResult<ShiftRecord> {
        let valid = fields.validate()?;
        let hours = worked_minutes.max(0) as f64 / 60.0;
        self.insert_new(&valid, hours, tasks_completed)
    }

    fn insert_new(
        &self,
        valid: &ValidShift,
        hours: f64,
        tasks_completed: Option<u32>,
    ) -> AppResult<ShiftRecord> {
        let mut guard = self.lock();

        let id = match guard.keys().next_back() {
            Some(last) => last.next().ok_or_else(|| {
                AppError::Validation(format!("no shift id left after {last}"))
            })?,
            None => ShiftId::new(1),
        };
        let record = ShiftRecord::from_valid(id, valid, hours, tasks_completed);

        guard.insert(id, record.clone());
        if let Err(e) = self.persist(&guard) {
            guard.remove(&id);
            return Err(e);
        }

        info!(%id, hours = %record.duration_hours, pay = %record.gross_pay, "shift created");
        Ok(record)
    }

    /// Replace the fields of shift `id`, keeping its id and task count.
    pub fn update(&self, id: ShiftId, fields: &ShiftFields) -> AppResult<ShiftRecord> {
        let valid = fields.validate()?;
        let mut guard = self.lock();

        let previous = guard
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("shift {id}")))?;

        let record =
            ShiftRecord::from_valid(id, &valid, valid.duration_hours(), previous.tasks_completed);

        guard.insert(id, record.clone());
        if let Err(e) = self.persist(&guard) {
            guard.insert(id, previous);
            return Err(e);
        }

        info!(%id, "shift updated");
        Ok(record)
    }

    /// Remove shift `id` and any note filed under it.
    pub fn delete(&self, id: ShiftId) -> AppResult<ShiftRecord> {
        let removed = {
            let mut guard = self.lock();
            let removed = guard
                .remove(&id)
                .ok_or_else(|| AppError::NotFound(format!("shift {id}")))?;

            if let Err(e) = self.persist(&guard) {
                guard.insert(id, removed);
                return Err(e);
            }
            removed
        };

        let notes = self.archive.delete(id);
        info!(%id, notes, "shift deleted");
        Ok(removed)
    }

    pub fn totals(&self) -> Totals {
        Totals::from_records(self.lock().values())
    }
}
