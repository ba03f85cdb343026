//! Async front of [`ShiftStore`].
//!
//! Each mutation runs on the blocking pool and hands back its `JoinHandle`:
//! the caller decides whether to await it before refreshing a view.

use super::ShiftStore;
use crate::errors::{AppError, AppResult};
use crate::models::{ShiftFields, ShiftId, ShiftRecord, Totals};
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<ShiftStore>,
}

impl StoreHandle {
    pub fn new(store: ShiftStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &ShiftStore {
        &self.store
    }

    fn spawn<T, F>(&self, op: F) -> JoinHandle<AppResult<T>>
    where
        T: Send + 'static,
        F: FnOnce(&ShiftStore) -> AppResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&store))
    }

    pub fn create(&self, fields: ShiftFields) -> JoinHandle<AppResult<ShiftRecord>> {
        self.spawn(move |s| s.create(&fields))
    }

    pub fn create_timed(
        &self,
        fields: ShiftFields,
        worked_minutes: i64,
        tasks_completed: Option<u32>,
    ) -> JoinHandle<AppResult<ShiftRecord>> {
        self.spawn(move |s| s.create_timed(&fields, worked_minutes, tasks_completed))
    }

    pub fn update(&self, id: ShiftId, fields: ShiftFields) -> JoinHandle<AppResult<ShiftRecord>> {
        self.spawn(move |s| s.update(id, &fields))
    }

    pub fn delete(&self, id: ShiftId) -> JoinHandle<AppResult<ShiftRecord>> {
        self.spawn(move |s| s.delete(id))
    }

    pub fn totals(&self) -> Totals {
        self.store.totals()
    }
}

/// Flatten the result of an awaited store task.
pub async fn settle<T>(task: JoinHandle<AppResult<T>>) -> AppResult<T> {
    task.await
        .map_err(|e| AppError::Other(format!("store task failed: {e}")))?
}
