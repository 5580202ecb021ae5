// The `refresh` command: build the catalog, resolve the operator's
// selection, and drive each selected application through the
// uninstall → cleanup → reinstall pipeline.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::libs::runner::{DryRunRunner, ProcessRunner, WingetRunner};
use crate::libs::selector::InteractivePicker;
use crate::libs::{
    catalog_builder, config_loading, inventory, pipeline::PipelineExecutor, preflight, registry,
    report, selector,
};
use crate::schemas::outcome::{FinalState, PipelineOutcome};
use crate::{errors::RunError, log_info, log_warn};

/// Run-level flags for a refresh, straight off the command line.
pub struct RefreshOptions {
    pub ids: Vec<String>,
    pub names: Vec<String>,
    pub include_store: bool,
    pub pin_version: bool,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
    pub config: Option<String>,
}

/// Entry point for `winget-refresh refresh`.
///
/// Phases: preflight → catalog → selection → pipeline → summary. Fatal
/// conditions (missing tool, missing elevation, empty inventory) abort
/// before any pipeline executes; everything after that point is isolated
/// per application.
pub fn run(options: RefreshOptions) -> Result<()> {
    let config = config_loading::load_config(options.config.as_deref());

    preflight::ensure_tool_available(&config.winget_path)?;
    preflight::ensure_elevated()?;

    if options.dry_run {
        log_info!(
            "{} no uninstall, deletion or reinstall will be performed",
            "Dry-run mode:".bold()
        );
    }

    // Build the catalog. The listing runs live even under dry-run: it is
    // read-only, and dry-run decisions must match a real run's.
    let raw_listing = inventory::fetch_listing(&config.winget_path)?;
    let inventory_records = inventory::parse_listing(&raw_listing);
    if inventory_records.is_empty() {
        return Err(RunError::EmptyInventory.into());
    }
    log_info!(
        "[Catalog] {} packages reported by the package manager",
        inventory_records.len()
    );

    let system_records = registry::read_system_inventory();
    let catalog = catalog_builder::join(inventory_records, &system_records);

    let selection = selector::resolve(
        &catalog,
        &options.ids,
        &options.names,
        options.include_store,
        &config.store_source,
        &InteractivePicker,
    );
    if selection.is_empty() {
        log_info!("Nothing selected; nothing to do.");
        return Ok(());
    }
    log_info!("[Pipeline] {} application(s) selected", selection.len());

    let runner: Box<dyn ProcessRunner> = if options.dry_run {
        Box::new(DryRunRunner {
            program: config.winget_path.clone(),
        })
    } else {
        Box::new(WingetRunner {
            program: config.winget_path.clone(),
        })
    };

    let executor = PipelineExecutor::new(runner.as_ref(), options.pin_version, options.dry_run);
    let outcomes = executor.run_all(&selection);

    summarize(&outcomes);
    if let Some(report_path) = &options.report {
        report::write_run_report(report_path, &outcomes, options.dry_run)?;
    }
    Ok(())
}

/// Per-application closing summary, worst news last.
fn summarize(outcomes: &[PipelineOutcome]) {
    let reinstalled = outcomes
        .iter()
        .filter(|o| o.final_state == FinalState::Reinstalled)
        .count();
    log_info!(
        "Run complete: {}/{} application(s) reinstalled",
        reinstalled,
        outcomes.len()
    );

    for outcome in outcomes {
        match outcome.final_state {
            FinalState::Reinstalled => {}
            FinalState::UninstallFailed => log_warn!(
                "  {} ({}): uninstall failed (code {}); left installed",
                outcome.app.name.yellow(),
                outcome.app.identifier,
                outcome.uninstall_code.unwrap_or(-1)
            ),
            FinalState::ReinstallFailed => log_warn!(
                "  {} ({}): uninstalled but reinstall failed (code {})",
                outcome.app.name.yellow(),
                outcome.app.identifier,
                outcome.reinstall_code.unwrap_or(-1)
            ),
            // Transit states never survive a finished pipeline, but keep
            // the summary total if they ever do.
            FinalState::Pending | FinalState::Cleaned => log_warn!(
                "  {} ({}): pipeline ended in state {:?}",
                outcome.app.name.yellow(),
                outcome.app.identifier,
                outcome.final_state
            ),
        }
        if let Some(cleanup_error) = &outcome.cleanup_error {
            log_warn!(
                "  {}: leftover cleanup incomplete: {}",
                outcome.app.name,
                cleanup_error
            );
        }
    }
}
