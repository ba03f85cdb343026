//! Application context built once at startup and handed to the commands.

use crate::archive::LogArchive;
use crate::config::Config;
use crate::store::{ShiftStore, StoreHandle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    /// Never write the configuration file (set by the hidden `--test` flag).
    pub is_test: bool,
}

impl AppContext {
    pub fn new(config: Config, is_test: bool) -> Self {
        Self { config, is_test }
    }

    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.config.data_file)
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.logs_dir)
    }

    pub fn archive(&self) -> LogArchive {
        LogArchive::new(self.logs_dir())
    }

    /// Open (and load) the shift store.
    pub fn open_store(&self) -> ShiftStore {
        ShiftStore::open(self.data_file(), self.archive())
    }

    pub fn open_handle(&self) -> StoreHandle {
        StoreHandle::new(self.open_store())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.config.tick_millis)
    }
}
