//! # Refresh Pipeline
//!
//! Drives each selected application through the ordered, short-circuiting
//! uninstall → cleanup → reinstall sequence and records a
//! [`PipelineOutcome`] per application.
//!
//! Failure isolation is the core contract here: a non-zero exit anywhere is
//! a warning scoped to that one application, never a reason to abort the
//! run. The only short-circuit is within a single application: a failed
//! uninstall skips that application's cleanup and reinstall, because
//! reinstalling over a half-removed install would make things worse.

use colored::Colorize;

use crate::libs::cleanup;
use crate::libs::runner::ProcessRunner;
use crate::schemas::catalog::AppRecord;
use crate::schemas::outcome::{FinalState, PipelineOutcome};
use crate::{log_info, log_warn};

/// Sequential executor over a run's selection.
///
/// The subprocess capability is injected; passing a `DryRunRunner` (plus
/// `dry_run` for the filesystem side) turns the whole pipeline into a pure
/// decision log.
pub struct PipelineExecutor<'a> {
    runner: &'a dyn ProcessRunner,
    pin_version: bool,
    dry_run: bool,
}

impl<'a> PipelineExecutor<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, pin_version: bool, dry_run: bool) -> Self {
        PipelineExecutor {
            runner,
            pin_version,
            dry_run,
        }
    }

    /// Runs every selected application to completion, in selection order.
    pub fn run_all(&self, selection: &[AppRecord]) -> Vec<PipelineOutcome> {
        selection.iter().map(|app| self.run_one(app)).collect()
    }

    /// One application's full pipeline.
    fn run_one(&self, app: &AppRecord) -> PipelineOutcome {
        let mut outcome = PipelineOutcome::new(app.clone());
        log_info!(
            "[Pipeline] Refreshing {} ({}) version {}",
            app.name.bold(),
            app.identifier.cyan(),
            app.version
        );

        // Step 1: uninstall. A failure here is terminal for this app.
        let uninstall = self.runner.run(&build_uninstall_args(app));
        outcome.uninstall_code = Some(uninstall.code);
        if !uninstall.success() {
            log_warn!(
                "[Pipeline] Uninstall of '{}' failed with code {}; skipping cleanup and reinstall",
                app.name.yellow(),
                uninstall.code
            );
            outcome.final_state = FinalState::UninstallFailed;
            return outcome;
        }

        // Step 2: cleanup. Best-effort; a failure is recorded but the
        // reinstall still happens.
        outcome.cleanup_attempted = true;
        if let Err(e) = cleanup::remove_leftovers(app, self.dry_run) {
            log_warn!("[Pipeline] Cleanup for '{}' incomplete: {}", app.name, e);
            outcome.cleanup_error = Some(e);
        }
        outcome.final_state = FinalState::Cleaned;

        // Step 3: reinstall, pinned to the recorded version when requested.
        let reinstall = self
            .runner
            .run(&build_install_args(app, self.pin_version));
        outcome.reinstall_code = Some(reinstall.code);
        if reinstall.success() {
            log_info!(
                "[Pipeline] Reinstalled {} ({})",
                app.name.bold().green(),
                app.identifier
            );
            outcome.final_state = FinalState::Reinstalled;
        } else {
            // A rejected version pin surfaces here too; there is no
            // automatic retry without the pin.
            log_warn!(
                "[Pipeline] Reinstall of '{}' failed with code {}",
                app.name.yellow(),
                reinstall.code
            );
            outcome.final_state = FinalState::ReinstallFailed;
        }
        outcome
    }
}

/// Argument vector for the uninstall step.
pub fn build_uninstall_args(app: &AppRecord) -> Vec<String> {
    let mut args = vec![
        "uninstall".to_string(),
        "--id".to_string(),
        app.identifier.clone(),
        "--accept-source-agreements".to_string(),
        "-e".to_string(),
        "--silent".to_string(),
    ];
    if !app.source.trim().is_empty() {
        args.push("--source".to_string());
        args.push(app.source.clone());
    }
    args
}

/// Argument vector for the reinstall step. The version constraint is added
/// only when pinning was requested and the record actually carries a
/// version; pinning stays best-effort.
pub fn build_install_args(app: &AppRecord, pin_version: bool) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        "--id".to_string(),
        app.identifier.clone(),
        "--accept-source-agreements".to_string(),
        "--accept-package-agreements".to_string(),
        "-e".to_string(),
        "--silent".to_string(),
    ];
    if !app.source.trim().is_empty() {
        args.push("--source".to_string());
        args.push(app.source.clone());
    }
    if pin_version && !app.version.trim().is_empty() {
        args.push("--version".to_string());
        args.push(app.version.clone());
    }
    args
}
