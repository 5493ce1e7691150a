//! JSON report output.
//!
//! The report is written pretty-printed to a sibling temporary file first and
//! then renamed into place, so an interrupted write never leaves a truncated
//! report at the target path.

use crate::error::OutputWriteError;
use crate::models::ScrapeReport;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Write `report` to `path`, creating missing parent directories.
///
/// # Errors
///
/// - [`OutputWriteError::Serialize`] if the report cannot be serialized.
/// - [`OutputWriteError::Io`] if a directory or the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &ScrapeReport, path: &Path) -> Result<(), OutputWriteError> {
    let json = serde_json::to_string_pretty(report)?;
    let io_error = |error: std::io::Error| OutputWriteError::Io {
        path: path.display().to_string(),
        error,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let written = match fs::write(&tmp, json.as_bytes()).await {
        Ok(()) => fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            debug!(error = %cleanup, "Temporary report file not removed");
        }
        return Err(io_error(e));
    }

    info!(bytes = json.len(), "Wrote JSON report");
    Ok(())
}
