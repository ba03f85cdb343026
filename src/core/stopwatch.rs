//! Stopwatch accumulating running time over start/stop cycles.
//!
//! ```text
//! Idle --start()--> Running --stop()--> Idle (elapsed += now - last_start)
//!   any --reset()--> Idle with elapsed = 0
//! ```
//!
//! All state sits behind one mutex so the display ticker can read while the
//! session starts, stops or resets.

use super::clock::{Clock, SystemClock};
use crate::utils::time::format_elapsed;
use chrono::{DateTime, Local, TimeDelta};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct State {
    elapsed: TimeDelta,
    running: bool,
    last_start: Option<DateTime<Local>>,
}

impl State {
    /// Time since the last start, never negative.
    fn live(&self, now: DateTime<Local>) -> TimeDelta {
        match (self.running, self.last_start) {
            (true, Some(started)) => (now - started).max(TimeDelta::zero()),
            _ => TimeDelta::zero(),
        }
    }
}

pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    state: Mutex<State>,
}

impl Stopwatch<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Stopwatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: Mutex::new(State {
                elapsed: TimeDelta::zero(),
                running: false,
                last_start: None,
            }),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_locked(&self, s: &mut State) {
        if !s.running {
            s.running = true;
            s.last_start = Some(self.clock.now());
            trace!(elapsed = ?s.elapsed, "stopwatch started");
        }
    }

    fn stop_locked(&self, s: &mut State) {
        if s.running {
            let live = s.live(self.clock.now());
            s.elapsed += live;
            s.running = false;
            trace!(elapsed = ?s.elapsed, "stopwatch stopped");
        }
    }

    /// No-op when already running.
    pub fn start(&self) {
        self.start_locked(&mut self.lock());
    }

    /// No-op when not running.
    pub fn stop(&self) {
        self.stop_locked(&mut self.lock());
    }

    pub fn reset(&self) {
        let mut s = self.lock();
        s.running = false;
        s.elapsed = TimeDelta::zero();
        s.last_start = None;
        trace!("stopwatch reset");
    }

    /// Start when idle, stop when running, under one lock. Returns the new
    /// running state.
    pub fn toggle(&self) -> bool {
        let mut s = self.lock();
        if s.running {
            self.stop_locked(&mut s);
        } else {
            self.start_locked(&mut s);
        }
        s.running
    }

    pub fn current_elapsed(&self) -> TimeDelta {
        let s = self.lock();
        s.elapsed + s.live(self.clock.now())
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Wall-clock instant of the last start, if any.
    pub fn last_start(&self) -> Option<DateTime<Local>> {
        self.lock().last_start
    }

    /// `HH:MM:SS`, total hours.
    pub fn display(&self) -> String {
        format_elapsed(self.current_elapsed())
    }
}
