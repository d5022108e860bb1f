//! CSV export of filtered record lists.

pub mod csv;

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};

pub use self::csv::{
    export_filename, export_purchases, export_sales, CsvExport, CSV_MIME_TYPE, PURCHASE_HEADER,
    SALE_HEADER,
};

/// Writes an export into `dir` under its own file name.
///
/// The content is staged next to the target and renamed into place; on any
/// failure the staging file is removed, so no partial export is left behind.
pub fn write_export(export: &CsvExport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|err| export_error(dir, err))?;
    let target = dir.join(&export.filename);
    let staging = dir.join(format!(".{}.part", export.filename));

    let written = stage(&staging, &export.content).and_then(|_| fs::rename(&staging, &target));
    if let Err(err) = written {
        let _ = fs::remove_file(&staging);
        tracing::error!(file = %target.display(), error = %err, "CSV export failed");
        return Err(export_error(&target, err));
    }

    tracing::info!(
        file = %target.display(),
        rows = export.row_count,
        "CSV export written"
    );
    Ok(target)
}

fn stage(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.sync_all()
}

fn export_error(path: &Path, err: std::io::Error) -> LedgerError {
    LedgerError::Export(format!("{}: {}", path.display(), err))
}
