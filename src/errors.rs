//! Unified application error type.
//! Every module (store, archive, core, cli) returns AppError so the CLI can
//! report failures in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Shift records
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    Format(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to save shifts: {0}")]
    Persistence(String),

    #[error("Failed to load shifts: {0}")]
    Load(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export / backup
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
