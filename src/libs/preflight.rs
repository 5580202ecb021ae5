// Fatal-precondition checks, run before the catalog is built. Anything that
// fails here stops the run before a single pipeline executes.

use std::process::Command;

use colored::Colorize;

use crate::errors::RunError;
use crate::log_debug;
#[cfg(windows)]
use crate::log_warn;

/// Verifies the package-manager binary can be spawned at all.
pub fn ensure_tool_available(program: &str) -> Result<(), RunError> {
    match Command::new(program).arg("--version").output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            log_debug!(
                "[Preflight] Found {} ({})",
                program.cyan(),
                version.trim()
            );
            Ok(())
        }
        Err(e) => {
            log_debug!("[Preflight] Could not spawn '{program}': {e}");
            Err(RunError::MissingTool(program.to_string()))
        }
    }
}

/// Verifies the shell is elevated. Machine-wide uninstalls fail part-way
/// through without it, which is worse than refusing up front.
///
/// The check runs for dry-run too, so a dry-run aborts exactly where a live
/// run would.
#[cfg(windows)]
pub fn ensure_elevated() -> Result<(), RunError> {
    // `net session` succeeds only from an elevated shell; the classic probe.
    match Command::new("net").arg("session").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(RunError::NotElevated),
        Err(e) => {
            log_warn!("[Preflight] Could not determine elevation state ({e}); continuing");
            Ok(())
        }
    }
}

/// Elevation is a Windows concern; elsewhere this is a no-op.
#[cfg(not(windows))]
pub fn ensure_elevated() -> Result<(), RunError> {
    log_debug!("[Preflight] Elevation check skipped on this platform");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_fatal() {
        let result = ensure_tool_available("no-such-binary-anywhere");
        assert!(matches!(result, Err(RunError::MissingTool(name)) if name == "no-such-binary-anywhere"));
    }

    #[cfg(unix)]
    #[test]
    fn present_tool_passes() {
        assert!(ensure_tool_available("sh").is_ok());
    }
}
