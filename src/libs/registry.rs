//! # System Inventory (Uninstall registry tree)
//!
//! Enumerates the installed-software records Windows keeps under the
//! per-machine (64-bit and WOW6432Node) and per-user `Uninstall` keys.
//! Strictly read-only: nothing in this module ever writes to the registry.
//!
//! On non-Windows hosts the snapshot is empty; the catalog join then falls
//! back to inventory-only data, which downstream code already treats as the
//! expected best-effort case.

use colored::Colorize;

use crate::log_debug;
use crate::schemas::catalog::SystemInventoryRecord;

#[cfg(windows)]
const UNINSTALL_ROOTS: [(&str, &str); 3] = [
    (
        "HKLM",
        r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
    ),
    (
        "HKLM",
        r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall",
    ),
    (
        "HKCU",
        r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall",
    ),
];

/// Takes the run's read-only snapshot of installed-software records.
///
/// All configured roots are merged into one flat list before normalization,
/// so a per-user record seen first shadows a per-machine duplicate of the
/// same display name (and vice versa, in root order).
pub fn read_system_inventory() -> Vec<SystemInventoryRecord> {
    let records = enumerate_uninstall_records();
    let normalized = normalize_records(records);
    log_debug!(
        "[Registry] System inventory snapshot holds {} records",
        normalized.len()
    );
    normalized
}

#[cfg(windows)]
fn enumerate_uninstall_records() -> Vec<SystemInventoryRecord> {
    use winreg::RegKey;
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ};

    let mut records = Vec::new();
    for (hive_name, root_path) in UNINSTALL_ROOTS {
        let hive = match hive_name {
            "HKCU" => RegKey::predef(HKEY_CURRENT_USER),
            _ => RegKey::predef(HKEY_LOCAL_MACHINE),
        };
        let root = match hive.open_subkey_with_flags(root_path, KEY_READ) {
            Ok(key) => key,
            Err(e) => {
                // A missing WOW6432Node root is normal on 32-bit installs.
                log_debug!("[Registry] Skipping {hive_name}\\{root_path}: {e}");
                continue;
            }
        };
        for key_name in root.enum_keys().flatten() {
            let Ok(entry) = root.open_subkey_with_flags(&key_name, KEY_READ) else {
                continue;
            };
            let display_name: String = match entry.get_value("DisplayName") {
                Ok(name) => name,
                Err(_) => continue,
            };
            records.push(SystemInventoryRecord {
                display_name,
                display_version: entry.get_value("DisplayVersion").ok(),
                install_location: entry.get_value("InstallLocation").ok(),
                publisher: entry.get_value("Publisher").ok(),
                source_key: format!("{hive_name}\\{root_path}\\{key_name}"),
            });
        }
    }
    records
}

#[cfg(not(windows))]
fn enumerate_uninstall_records() -> Vec<SystemInventoryRecord> {
    log_debug!("[Registry] No system inventory store on this platform; snapshot is empty");
    Vec::new()
}

/// Drops records without a display name and collapses duplicate display
/// names, first occurrence wins.
///
/// Later duplicates are discarded even when they carry richer metadata;
/// a documented best-effort tradeoff, not a correctness requirement.
pub fn normalize_records(records: Vec<SystemInventoryRecord>) -> Vec<SystemInventoryRecord> {
    let mut normalized: Vec<SystemInventoryRecord> = Vec::new();
    for record in records {
        if record.display_name.trim().is_empty() {
            continue;
        }
        if normalized
            .iter()
            .any(|kept| kept.display_name == record.display_name)
        {
            continue;
        }
        // Empty-string locations show up for store-managed entries; treat
        // them the same as an absent value.
        let install_location = record
            .install_location
            .filter(|loc| !loc.trim().is_empty());
        normalized.push(SystemInventoryRecord {
            install_location,
            ..record
        });
    }
    normalized
}
