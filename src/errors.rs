// Fatal, run-aborting conditions. Everything here stops the run before (or
// while) the catalog is built; per-application problems are never expressed
// through this type; they stay inside the affected application's outcome.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    /// The package-manager binary could not be spawned at all.
    #[error("required tool '{0}' was not found on PATH")]
    MissingTool(String),

    /// Machine-wide uninstalls need an elevated shell on Windows.
    #[error("administrator privileges are required; re-run from an elevated shell")]
    NotElevated,

    /// The listing command produced no parseable packages. An empty catalog
    /// is a broken precondition, not something to silently iterate over.
    #[error("package manager returned an empty application listing")]
    EmptyInventory,

    /// The operator asked for a run report but it could not be written.
    #[error("failed to write run report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
