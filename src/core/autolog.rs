//! Autologger session: a stopwatch-timed shift with optional sub-tasks.
//!
//! Metadata is collected first, then the stopwatch runs while tasks and
//! notes are gathered. Finishing stores the shift (duration from the
//! stopwatch, floored to whole minutes) and files a markdown note under the
//! new shift id. Cancelling stores nothing.

use super::clock::{Clock, SystemClock};
use super::stopwatch::Stopwatch;
use crate::errors::{AppError, AppResult};
use crate::models::{ShiftFields, ShiftRecord, Task};
use crate::store::handle::{StoreHandle, settle};
use crate::store::ShiftStore;
use crate::utils::time::{format_hhmm, whole_minutes};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub const DIVIDER_WIDTH: usize = 64;

/// What the user enters before the clock starts.
#[derive(Debug, Clone, Default)]
pub struct SessionMeta {
    pub model_id: String,
    pub project_id: String,
    pub hourly_rate: String,
}

impl SessionMeta {
    fn validate(&self) -> AppResult<SessionMeta> {
        let model_id = self.model_id.trim().to_uppercase();
        let project_id = self.project_id.trim().to_uppercase();
        let rate = self.hourly_rate.trim();

        if model_id.is_empty() || project_id.is_empty() || rate.is_empty() {
            return Err(AppError::Validation(
                "model id, project id and hourly rate are required".into(),
            ));
        }
        match rate.parse::<f64>() {
            Ok(r) if r.is_finite() && r >= 0.0 => {}
            _ => {
                return Err(AppError::Validation(format!(
                    "invalid hourly rate '{rate}': please enter a numeric value"
                )));
            }
        }

        Ok(SessionMeta {
            model_id,
            project_id,
            hourly_rate: rate.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct AutologOutcome {
    pub record: ShiftRecord,
    pub note: PathBuf,
}

pub struct AutologSession<C: Clock = SystemClock> {
    meta: SessionMeta,
    stopwatch: Arc<Stopwatch<C>>,
    tasks: Vec<Task>,
    notes: String,
    /// Shift already stored by a finish whose note could not be written.
    stored: Option<ShiftRecord>,
}

impl<C: Clock> AutologSession<C> {
    /// Validate the metadata and start the stopwatch.
    pub fn begin(meta: SessionMeta, stopwatch: Arc<Stopwatch<C>>) -> AppResult<Self> {
        let meta = meta.validate()?;
        stopwatch.start();
        info!(model = %meta.model_id, project = %meta.project_id, "autologger session started");

        Ok(Self {
            meta,
            stopwatch,
            tasks: Vec::new(),
            notes: String::new(),
            stored: None,
        })
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The shift stored by an earlier [`finish`](Self::finish) that failed
    /// to write its note.
    pub fn stored(&self) -> Option<&ShiftRecord> {
        self.stored.as_ref()
    }

    /// Record a completed task; incomplete tasks are rejected and leave the
    /// session unchanged. Returns the number of tasks so far.
    pub fn add_task(&mut self, task: Task) -> AppResult<usize> {
        task.validate()?;
        self.tasks.push(task);
        Ok(self.tasks.len())
    }

    pub fn add_note(&mut self, line: &str) {
        self.notes.push_str(line);
        if !line.ends_with('\n') {
            self.notes.push('\n');
        }
    }

    pub fn insert_divider(&mut self) {
        self.notes.push_str(&"═".repeat(DIVIDER_WIDTH));
        self.notes.push('\n');
    }

    /// Stop the clock and derive the shift fields and worked minutes.
    fn conclude(&self) -> (ShiftFields, i64, Option<u32>) {
        self.stopwatch.stop();
        let elapsed = self.stopwatch.current_elapsed();
        let now = self.stopwatch.clock().now();
        let started = now - elapsed;

        let fields = ShiftFields {
            date: now.format("%Y-%m-%d").to_string(),
            model_id: self.meta.model_id.clone(),
            project_id: self.meta.project_id.clone(),
            time_in: format_hhmm(started.time()),
            time_out: format_hhmm(now.time()),
            hourly_rate: self.meta.hourly_rate.clone(),
        };

        let tasks = if self.tasks.is_empty() {
            None
        } else {
            u32::try_from(self.tasks.len()).ok()
        };

        (fields, whole_minutes(elapsed), tasks)
    }

    /// Write the note of the stored shift and close the session. On failure
    /// the record stays in `stored` so a retry only writes the note.
    fn file_note(&mut self, store: &ShiftStore, record: ShiftRecord) -> AppResult<AutologOutcome> {
        let text = render_note(&record, &self.tasks, &self.notes);
        let note = match store.archive().write(record.id, &text) {
            Ok(note) => note,
            Err(e) => {
                warn!(id = %record.id, error = %e, "shift stored but its note could not be written");
                self.stored = Some(record);
                return Err(e);
            }
        };

        self.stopwatch.reset();
        self.tasks.clear();
        self.notes.clear();
        self.stored = None;
        info!(id = %record.id, note = %note.display(), "autologger session finished");

        Ok(AutologOutcome { record, note })
    }

    /// Stop the clock, store the shift and write its note.
    ///
    /// If storing fails the session keeps its tasks and the stopwatch stays
    /// stopped, so the caller may resume or retry. If only the note fails,
    /// the shift stays stored once and a retry writes the note alone.
    pub fn finish(&mut self, store: &ShiftStore) -> AppResult<AutologOutcome> {
        let record = match self.stored.take() {
            Some(record) => record,
            None => {
                let (fields, minutes, tasks) = self.conclude();
                store.create_timed(&fields, minutes, tasks)?
            }
        };
        self.file_note(store, record)
    }

    /// [`finish`](Self::finish) through the async store handle.
    pub async fn finish_async(&mut self, handle: &StoreHandle) -> AppResult<AutologOutcome> {
        let record = match self.stored.take() {
            Some(record) => record,
            None => {
                let (fields, minutes, tasks) = self.conclude();
                settle(handle.create_timed(fields, minutes, tasks)).await?
            }
        };
        self.file_note(handle.store(), record)
    }

    /// Drop everything collected. Nothing is stored, apart from a shift an
    /// earlier finish already stored without its note.
    pub fn cancel(self) {
        self.stopwatch.reset();
        match &self.stored {
            Some(record) => {
                warn!(id = %record.id, "autologger session closed, shift kept without a note")
            }
            None => info!(tasks = self.tasks.len(), "autologger session cancelled"),
        }
    }
}

/// Markdown note for an autologged shift.
pub fn render_note(record: &ShiftRecord, tasks: &[Task], notes: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# `{}.md`\n", record.id);
    let _ = writeln!(
        out,
        "{} · {} / {} · {} → {} ({} h)\n",
        record.date,
        record.model_id,
        record.project_id,
        record.time_in,
        record.time_out,
        record.duration_hours
    );
    out.push_str("----\n\n");

    for (i, task) in tasks.iter().enumerate() {
        let _ = write!(
            out,
            "{n}. `{platform}`\n\n\
             [Permalink]\n{permalink}\n\n\
             [Response IDs]\n1. `{r1}`\n2. `{r2}`\n\n\
             [Rank]\n{rank}\n\n\
             [Justification]\n{justification}\n\n",
            n = i + 1,
            platform = task.platform_id,
            permalink = task.permalink,
            r1 = task.response1_id,
            r2 = task.response2_id,
            rank = task.rank,
            justification = task.justification.trim_end(),
        );
    }

    if !notes.trim().is_empty() {
        out.push_str("## Notes\n\n");
        out.push_str(notes);
        if !notes.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
