//! # Leftover Cleanup
//!
//! After a successful uninstall, the application's recorded install
//! directory often survives with caches, logs or self-update droppings in
//! it. This module removes that directory best-effort: read-only attributes
//! are stripped first, deletion runs contents-first, and a stubborn item is
//! reported and skipped rather than aborting the rest of the cleanup.
//!
//! Cleanup can never fail a pipeline; the caller records the error string
//! and proceeds to the reinstall step regardless.

use std::fs;
use std::path::Path;

use colored::Colorize;
use walkdir::WalkDir;

use crate::schemas::catalog::AppRecord;
use crate::{log_debug, log_info, log_warn};

/// Removes whatever is left of `app`'s install directory.
///
/// A missing or unrecorded location is a logged no-op. Under dry-run the
/// intended deletion is logged and nothing on disk is touched.
pub fn remove_leftovers(app: &AppRecord, dry_run: bool) -> Result<(), String> {
    let Some(location) = app.install_location.as_deref() else {
        log_debug!(
            "[Cleanup] No install location recorded for '{}'; nothing to clean",
            app.name
        );
        return Ok(());
    };
    let root = Path::new(location);
    if !root.exists() {
        log_info!(
            "[Cleanup] Install directory {} already gone; nothing to clean",
            location.cyan()
        );
        return Ok(());
    }
    if dry_run {
        log_info!(
            "[Cleanup] {} would remove directory {}",
            "(dry-run, not executed)".bold(),
            location.cyan()
        );
        return Ok(());
    }

    log_info!(
        "[Cleanup] Removing leftover install directory {}",
        location.cyan()
    );
    strip_readonly_attributes(root);
    let failed = delete_tree_best_effort(root);
    if failed == 0 {
        Ok(())
    } else {
        Err(format!(
            "{failed} item(s) under {location} could not be removed"
        ))
    }
}

/// Clears the read-only bit on every entry beneath (and including) `root`.
/// Installers love marking their payloads read-only, which would otherwise
/// make the forced deletion fail item by item.
fn strip_readonly_attributes(root: &Path) {
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let mut permissions = metadata.permissions();
        if !permissions.readonly() {
            continue;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(permissions.mode() | 0o200);
        }
        #[cfg(not(unix))]
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);

        if let Err(e) = fs::set_permissions(path, permissions) {
            log_warn!(
                "[Cleanup] Could not clear read-only attribute on {}: {}",
                path.display(),
                e
            );
        }
    }
}

/// Deletes the tree contents-first, tolerating individual failures.
/// Returns how many items were left behind.
fn delete_tree_best_effort(root: &Path) -> usize {
    let mut failed = 0usize;
    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let result = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = result {
            // Locked files stay behind; report and keep going.
            log_warn!("[Cleanup] Could not remove {}: {}", path.display(), e);
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn app_with_location(location: Option<&str>) -> AppRecord {
        AppRecord {
            name: "7-Zip".to_string(),
            identifier: "7zip.7zip".to_string(),
            version: "22.00".to_string(),
            source: "winget".to_string(),
            install_location: location.map(str::to_string),
            publisher: None,
            source_key: None,
        }
    }

    fn populate(root: &Path) {
        let nested = root.join("sub").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        let mut file = File::create(nested.join("leftover.dll")).unwrap();
        file.write_all(b"payload").unwrap();
        File::create(root.join("uninstall.log")).unwrap();
    }

    #[test]
    fn absent_location_is_a_noop() {
        assert!(remove_leftovers(&app_with_location(None), false).is_ok());
    }

    #[test]
    fn missing_directory_is_a_noop() {
        let app = app_with_location(Some("/definitely/not/a/real/dir"));
        assert!(remove_leftovers(&app, false).is_ok());
    }

    #[test]
    fn dry_run_leaves_the_tree_untouched() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let app = app_with_location(dir.path().to_str());

        assert!(remove_leftovers(&app, true).is_ok());
        assert!(dir.path().join("sub/deeper/leftover.dll").exists());
        assert!(dir.path().join("uninstall.log").exists());
    }

    #[test]
    fn removes_nested_tree_including_readonly_entries() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let readonly = dir.path().join("sub").join("deeper").join("leftover.dll");
        let mut permissions = fs::metadata(&readonly).unwrap().permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(0o444);
        }
        #[cfg(not(unix))]
        permissions.set_readonly(true);
        fs::set_permissions(&readonly, permissions).unwrap();

        let app = app_with_location(dir.path().to_str());
        assert!(remove_leftovers(&app, false).is_ok());
        assert!(!dir.path().exists());
    }
}
