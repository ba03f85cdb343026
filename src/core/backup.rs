use crate::archive::LogArchive;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the data file to `dest`. With `compress`, write a zip holding the
    /// data file and every note instead. Returns the path written.
    pub fn backup(
        data_file: &Path,
        archive: &LogArchive,
        dest: &Path,
        compress: bool,
    ) -> AppResult<PathBuf> {
        // 1️⃣ Check data file exists
        if !data_file.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Data file not found: {}", data_file.display()),
            )));
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            compress_backup(data_file, archive, &dest.with_extension("zip"))?
        } else {
            fs::copy(data_file, dest)?;
            dest.to_path_buf()
        };

        info!(dest = %final_path.display(), compress, "backup created");
        success(format!("Backup created: {}", final_path.display()));
        Ok(final_path)
    }
}

/// Zip the data file plus `logs/<note>` entries.
fn compress_backup(data_file: &Path, archive: &LogArchive, zip_path: &Path) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let data_name = data_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "data.json".to_string());

    zip.start_file(data_name, options.clone())
        .map_err(std::io::Error::other)?;
    zip.write_all(&fs::read(data_file)?)?;

    for name in archive.list()? {
        match archive.read(&name) {
            Ok(content) => {
                zip.start_file(format!("logs/{name}"), options.clone())
                    .map_err(std::io::Error::other)?;
                zip.write_all(content.as_bytes())?;
            }
            Err(e) => warning(format!("Skipping note {name}: {e}")),
        }
    }

    zip.finish().map_err(std::io::Error::other)?;
    Ok(zip_path.to_path_buf())
}
