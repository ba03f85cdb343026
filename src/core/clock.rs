use chrono::{DateTime, Local, TimeDelta};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of wall-clock time. Lets the stopwatch run against a manual clock
/// in tests.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}

impl<C: Clock> Clock for Arc<C> {
    fn now(&self) -> DateTime<Local> {
        self.as_ref().now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }

    pub fn set(&self, to: DateTime<Local>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
