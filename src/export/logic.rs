// src/export/logic.rs

use crate::cli::prompt::confirm;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::store::ShiftStore;
use std::path::Path;
use tracing::info;

/// High-level export of every stored shift.
pub struct ExportLogic;

impl ExportLogic {
    pub fn export(store: &ShiftStore, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        let path = Path::new(file);

        if path.exists() && !force {
            let question = format!("'{}' already exists. Overwrite it?", path.display());
            if !confirm(&question) {
                return Err(AppError::Export(format!(
                    "{} left untouched (use --force to overwrite)",
                    path.display()
                )));
            }
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let shifts = store.list();

        match format {
            ExportFormat::Csv => export_csv(&shifts, path)?,
            ExportFormat::Json => export_json(&shifts, path)?,
        }

        info!(format = format.as_str(), file = %path.display(), count = shifts.len(), "shifts exported");
        Ok(())
    }
}
