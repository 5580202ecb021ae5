//! # Command Runner
//!
//! The synchronous subprocess capability the pipeline executes through.
//! Two implementations: [`WingetRunner`] spawns the package manager for
//! real; [`DryRunRunner`] logs the command it would have run and reports
//! success without spawning anything. Injecting one or the other keeps the
//! pipeline logic free of dry-run conditionals.

use std::process::Command;

use colored::Colorize;

use crate::{log_debug, log_error, log_info, log_warn};

/// Captured result of one subprocess invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Child exit code; -1 when the child had no code or never spawned.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Synchronous command execution capability.
pub trait ProcessRunner {
    /// Runs the tool with `args`, blocking until it exits.
    fn run(&self, args: &[String]) -> RunOutput;
}

/// Live runner: spawns the configured package-manager binary.
pub struct WingetRunner {
    pub program: String,
}

impl ProcessRunner for WingetRunner {
    fn run(&self, args: &[String]) -> RunOutput {
        log_info!(
            "[Runner] Executing: {} {}",
            self.program.cyan().bold(),
            args.join(" ").cyan()
        );

        // Arguments are passed as a vector, never re-joined into a shell
        // string, so names with spaces survive without quoting games.
        match Command::new(&self.program).args(args).output() {
            Ok(output) => {
                let code = output.status.code().unwrap_or(-1);
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if !stdout.trim().is_empty() {
                    log_info!("[Runner] Output: {}", stdout.trim());
                }
                if !stderr.trim().is_empty() {
                    log_warn!("[Runner] Error output: {}", stderr.trim());
                }
                log_debug!("[Runner] Exit code: {code}");
                RunOutput {
                    code,
                    stdout,
                    stderr,
                }
            }
            Err(e) => {
                log_error!(
                    "[Runner] Failed to execute '{}': {}",
                    self.program.red(),
                    e.to_string().red()
                );
                RunOutput {
                    code: -1,
                    stdout: String::new(),
                    stderr: e.to_string(),
                }
            }
        }
    }
}

/// Dry-run runner: logs the intended command and reports synthetic success.
pub struct DryRunRunner {
    pub program: String,
}

impl ProcessRunner for DryRunRunner {
    fn run(&self, args: &[String]) -> RunOutput {
        log_info!(
            "[Runner] {} {} {}",
            "(dry-run, not executed)".bold(),
            self.program.cyan(),
            args.join(" ").cyan()
        );
        RunOutput {
            code: 0,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}
