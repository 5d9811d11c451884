//! Result output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::info;

use rmds_engine::ResultRecord;

use crate::error::{FileError, FileResult};

/// Writes result rows as CSV with a header row.
///
/// # Errors
///
/// Returns `FileError::Io` if a row cannot be written.
pub fn write_results_to<W: Write>(writer: W, rows: &[ResultRecord]) -> FileResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    // header comes from the first serialized row; write it for an empty run too
    if rows.is_empty() {
        writer
            .write_record([
                "Security ID",
                "Scenario Name",
                "Scenario Date",
                "NPV_BASE",
                "NPV_UP",
                "NPV_DOWN",
            ])
            .map_err(|e| FileError::io("<output>", e))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| FileError::io("<output>", e))?;
    }
    writer.flush().map_err(|e| FileError::io("<output>", e))
}

/// Writes result rows to a CSV file, creating parent directories.
///
/// # Errors
///
/// Returns `FileError::Io` if the file cannot be created or written.
pub fn write_results(path: impl AsRef<Path>, rows: &[ResultRecord]) -> FileResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| FileError::io(path, e))?;
    write_results_to(file, rows).map_err(|e| match e {
        FileError::Io { message, .. } => FileError::Io {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;
    info!(file = %path.display(), rows = rows.len(), "results written");
    Ok(())
}
