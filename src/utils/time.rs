//! Time utilities: parsing HH:MM, duration computations, formatting elapsed time.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, TimeDelta, Timelike};
use regex::Regex;
use std::sync::LazyLock;

static HHMM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d$").expect("valid HH:MM regex"));

/// Parse a wall-clock time of day written as `HH:MM` (24h).
pub fn parse_hhmm(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    if !HHMM.is_match(t) {
        return Err(AppError::Format(t.to_string()));
    }
    NaiveTime::parse_from_str(t, "%H:%M").map_err(|_| AppError::Format(t.to_string()))
}

pub fn format_hhmm(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Minutes from `start` to `end`; an `end` earlier than `start` is taken
/// to be on the next day.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let mins = (end - start).num_minutes();
    if mins < 0 { mins + 24 * 60 } else { mins }
}

pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    minutes_between(start, end) as f64 / 60.0
}

/// Whole minutes contained in `elapsed`; partial minutes are dropped.
pub fn whole_minutes(elapsed: TimeDelta) -> i64 {
    elapsed.num_seconds().max(0) / 60
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Render elapsed time as `HH:MM:SS`; hours keep counting past 24.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
