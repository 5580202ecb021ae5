//! # Application Catalog Schema
//!
//! The catalog is built once per run by joining two independently-sourced
//! feeds:
//!
//! - the package manager's own listing (`InventoryRecord`, parsed from the
//!   tabular `winget list` output), and
//! - the installed-software records the OS keeps in the Uninstall registry
//!   tree (`SystemInventoryRecord`).
//!
//! Neither feed carries a foreign key into the other, so the join is a
//! best-effort name correlation and every downstream consumer treats the
//! registry-sourced fields as optional enrichment, never as guaranteed data.

use serde::Serialize;

/// One package as reported by the package manager's listing command.
///
/// `identifier` is the package manager's canonical key and is assumed to be
/// globally unique; the parser collapses duplicate identifiers first-seen
/// wins. Records are consumed by the catalog join and not kept afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    /// Human-readable display name (first listing column).
    pub name: String,
    /// Canonical package identifier, e.g. `7zip.7zip`.
    pub identifier: String,
    /// Version string as printed by the listing; may be empty.
    pub version: String,
    /// Origin channel, e.g. `winget` or `msstore`; may be empty for
    /// packages winget merely observed rather than installed.
    pub source: String,
}

/// One installed-software record from the OS inventory store.
///
/// Read-only snapshot taken at run start. `source_key` is the opaque
/// hive-qualified registry path the record came from; it is carried through
/// for the operator's benefit and never written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInventoryRecord {
    pub display_name: String,
    pub display_version: Option<String>,
    pub install_location: Option<String>,
    pub publisher: Option<String>,
    pub source_key: String,
}

/// One catalog entry: an inventory record enriched with whatever system
/// record the name correlation found, or nothing.
///
/// There is exactly one `AppRecord` per `InventoryRecord`; two inventory
/// records are never merged into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRecord {
    pub name: String,
    pub identifier: String,
    /// Best-available version: the system record's `display_version` when a
    /// correlation was found and it carries one, else the inventory version.
    pub version: String,
    pub source: String,
    /// Present only when a system record was correlated.
    pub install_location: Option<String>,
    pub publisher: Option<String>,
    pub source_key: Option<String>,
}

impl AppRecord {
    /// Builds an entry from an inventory record with no system-side match.
    pub fn inventory_only(inv: InventoryRecord) -> Self {
        AppRecord {
            name: inv.name,
            identifier: inv.identifier,
            version: inv.version,
            source: inv.source,
            install_location: None,
            publisher: None,
            source_key: None,
        }
    }

    /// Builds an entry from an inventory record and the system record the
    /// join correlated it with.
    pub fn correlated(inv: InventoryRecord, sys: &SystemInventoryRecord) -> Self {
        let version = match &sys.display_version {
            Some(v) if !v.trim().is_empty() => v.clone(),
            _ => inv.version,
        };
        AppRecord {
            name: inv.name,
            identifier: inv.identifier,
            version,
            source: inv.source,
            install_location: sys.install_location.clone(),
            publisher: sys.publisher.clone(),
            source_key: Some(sys.source_key.clone()),
        }
    }
}
