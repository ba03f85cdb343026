//! Note files written by the autologger, one per shift, named by shift id.

use crate::errors::{AppError, AppResult};
use crate::models::ShiftId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const NOTE_EXTENSION: &str = "md";

#[derive(Debug, Clone)]
pub struct LogArchive {
    dir: PathBuf,
}

impl LogArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn note_path(&self, id: ShiftId) -> PathBuf {
        self.dir.join(format!("{id}.{NOTE_EXTENSION}"))
    }

    /// Write (or replace) the note of shift `id`.
    pub fn write(&self, id: ShiftId, text: &str) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.note_path(id);
        fs::write(&path, text)?;
        debug!(note = %path.display(), "note written");
        Ok(path)
    }

    /// Names of the visible note files, sorted.
    pub fn list(&self) -> AppResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Content of the note called `name` (as returned by [`list`](Self::list)).
    pub fn read(&self, name: &str) -> AppResult<String> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(AppError::NotFound(format!("note '{name}'")));
        }

        match fs::read_to_string(self.dir.join(name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("note '{name}'")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every note whose file stem is `id`. Missing notes are fine;
    /// returns how many files were removed.
    pub fn delete(&self, id: ShiftId) -> usize {
        let stem = id.to_string();
        let names = match self.list() {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, dir = %self.dir.display(), "cannot scan notes directory");
                return 0;
            }
        };

        let mut removed = 0;
        for name in names {
            let path = self.dir.join(&name);
            if path.file_stem().map(|s| s.to_string_lossy() == stem) != Some(true) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(note = %path.display(), "note removed");
                    removed += 1;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(error = %e, note = %path.display(), "cannot remove note"),
            }
        }
        removed
    }
}
