// Writes the optional machine-readable run report: every pipeline outcome,
// pretty-printed JSON, at an operator-chosen path.

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::errors::RunError;
use crate::log_info;
use crate::schemas::outcome::{PipelineOutcome, RunReport};

/// Assembles and writes the report. Parent directories are created as
/// needed; a write failure is fatal only because the operator explicitly
/// asked for the artifact.
pub fn write_run_report(
    path: &Path,
    outcomes: &[PipelineOutcome],
    dry_run: bool,
) -> Result<(), RunError> {
    let report = RunReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        dry_run,
        outcomes: outcomes.to_vec(),
    };

    let json = serde_json::to_string_pretty(&report).map_err(|e| RunError::ReportWrite {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RunError::ReportWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(path, json).map_err(|e| RunError::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    log_info!(
        "[Report] Run report written to {}",
        path.display().to_string().cyan()
    );
    Ok(())
}
