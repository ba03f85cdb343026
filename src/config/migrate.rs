//! Configuration file checks and migrations.
//!
//! Older config files may lack keys introduced later. Loading still works
//! thanks to serde defaults, but `config --check` reports them and
//! `config --migrate` rewrites the file so every key is spelled out.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys a complete configuration file carries.
pub const KNOWN_KEYS: [&str; 5] = [
    "data_file",
    "logs_dir",
    "log_level",
    "tick_millis",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(_) => Err(AppError::Config(format!(
            "{} is not a key/value document",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!(
            "cannot parse {}: {e}",
            path.display()
        ))),
    }
}

/// Return the known keys missing from the config file at `path`.
/// A missing file is reported as missing every key.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    if !path.exists() {
        return Ok(KNOWN_KEYS.to_vec());
    }

    let map = read_mapping(path)?;
    Ok(KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Rewrite the config file with all known keys, preserving existing values.
///   Returns:
///   Ok(true)  → file updated
///   Ok(false) → no change needed
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    let missing = missing_keys(path)?;
    if missing.is_empty() {
        return Ok(false);
    }

    // Config::load_from fills the gaps with defaults
    let cfg = Config::load_from(path)?;
    cfg.save_to(path)?;

    tracing::info!(file = %path.display(), ?missing, "configuration migrated");
    Ok(true)
}
