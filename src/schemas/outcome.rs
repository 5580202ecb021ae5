// Per-application pipeline results. One `PipelineOutcome` is created when an
// application's pipeline starts, mutated as each step completes, and frozen
// once the sequence finishes; the run summary and the optional JSON report
// are built from the collected outcomes.

use serde::Serialize;

use crate::schemas::catalog::AppRecord;

/// Where an application's pipeline ended up.
///
/// `Pending` and `Cleaned` are transit states: `Pending` until the uninstall
/// step reports back, `Cleaned` between a successful uninstall (cleanup is
/// best-effort and cannot fail the pipeline) and the reinstall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinalState {
    Pending,
    UninstallFailed,
    Cleaned,
    Reinstalled,
    ReinstallFailed,
}

/// Step-by-step record for one selected application.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub app: AppRecord,
    /// Exit code of the uninstall command; `None` until the step ran.
    pub uninstall_code: Option<i32>,
    /// Whether the cleanup step was entered (it only runs after a clean
    /// uninstall, and counts as attempted even when it turns out to be a
    /// no-op because no install directory survived).
    pub cleanup_attempted: bool,
    /// Best-effort cleanup failure detail; never blocks the reinstall.
    pub cleanup_error: Option<String>,
    /// Exit code of the reinstall command; `None` when the step was skipped.
    pub reinstall_code: Option<i32>,
    pub final_state: FinalState,
}

impl PipelineOutcome {
    pub fn new(app: AppRecord) -> Self {
        PipelineOutcome {
            app,
            uninstall_code: None,
            cleanup_attempted: false,
            cleanup_error: None,
            reinstall_code: None,
            final_state: FinalState::Pending,
        }
    }
}

/// Envelope for the optional machine-readable run report.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// RFC 3339 local timestamp of when the report was assembled.
    pub generated_at: String,
    pub dry_run: bool,
    pub outcomes: Vec<PipelineOutcome>,
}
