//! # Catalog Builder
//!
//! Joins the package-manager inventory with the system inventory snapshot
//! into the run's unified catalog. There is no shared key between the two
//! feeds, so the correlation is by display name: exact equality first, then
//! a guarded prefix match. A miss is expected, not exceptional; the entry
//! simply carries inventory-only data.

use colored::Colorize;

use crate::log_debug;
use crate::schemas::catalog::{AppRecord, InventoryRecord, SystemInventoryRecord};

/// Joins the two feeds. Total and order-preserving over `inventory`: the
/// result holds exactly one `AppRecord` per `InventoryRecord`, in the same
/// order, no matter what the system snapshot looks like.
pub fn join(
    inventory: Vec<InventoryRecord>,
    system: &[SystemInventoryRecord],
) -> Vec<AppRecord> {
    let mut catalog = Vec::with_capacity(inventory.len());
    for inv in inventory {
        let matched = find_system_record(&inv.name, system);
        match matched {
            Some(sys) => {
                log_debug!(
                    "[Catalog] '{}' correlated with system record '{}'",
                    inv.name,
                    sys.display_name
                );
                catalog.push(AppRecord::correlated(inv, sys));
            }
            None => {
                log_debug!(
                    "[Catalog] '{}' has no system record; using inventory data only",
                    inv.name
                );
                catalog.push(AppRecord::inventory_only(inv));
            }
        }
    }
    catalog
}

/// Finds the system record for an inventory name: exact match first, then
/// the first prefix-with-boundary match in snapshot order.
fn find_system_record<'a>(
    name: &str,
    system: &'a [SystemInventoryRecord],
) -> Option<&'a SystemInventoryRecord> {
    if let Some(exact) = system.iter().find(|sys| sys.display_name == name) {
        return Some(exact);
    }
    system
        .iter()
        .find(|sys| name_matches_loosely(name, &sys.display_name))
}

/// Whether `display_name` starts with `name` followed immediately by the end
/// of the string, whitespace, a hyphen, or an opening parenthesis.
///
/// The boundary requirement guards against false positives like matching
/// "Git" against "GitKraken", while still catching the common
/// "<name> <version>" and "<name> (x64)" registry display names. The
/// boundary set is a heuristic tunable, not a guaranteed-correct algorithm.
pub fn name_matches_loosely(name: &str, display_name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    match display_name.strip_prefix(name) {
        Some(rest) => match rest.chars().next() {
            None => true,
            Some(next) => next.is_whitespace() || next == '-' || next == '(',
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(name: &str, identifier: &str, version: &str) -> InventoryRecord {
        InventoryRecord {
            name: name.to_string(),
            identifier: identifier.to_string(),
            version: version.to_string(),
            source: "winget".to_string(),
        }
    }

    fn sys(display_name: &str, version: Option<&str>, location: Option<&str>) -> SystemInventoryRecord {
        SystemInventoryRecord {
            display_name: display_name.to_string(),
            display_version: version.map(str::to_string),
            install_location: location.map(str::to_string),
            publisher: Some("Example Corp".to_string()),
            source_key: format!("HKLM\\Uninstall\\{display_name}"),
        }
    }

    #[test]
    fn exact_match_wins_and_prefers_system_version() {
        let catalog = join(
            vec![inv("Git", "Git.Git", "2.44")],
            &[sys("Git", Some("2.45.1"), Some(r"C:\Program Files\Git"))],
        );
        assert_eq!(catalog[0].version, "2.45.1");
        assert_eq!(
            catalog[0].install_location.as_deref(),
            Some(r"C:\Program Files\Git")
        );
        assert!(catalog[0].source_key.is_some());
    }

    #[test]
    fn prefix_match_accepts_space_boundary() {
        // The 7-Zip correlation: exact match fails, prefix + space succeeds.
        let catalog = join(
            vec![inv("7-Zip", "7zip.7zip", "22.00")],
            &[sys("7-Zip 22.00", None, Some(r"C:\Program Files\7-Zip"))],
        );
        assert_eq!(catalog[0].version, "22.00");
        assert_eq!(
            catalog[0].install_location.as_deref(),
            Some(r"C:\Program Files\7-Zip")
        );
    }

    #[test]
    fn prefix_match_rejects_mid_word_extension() {
        let catalog = join(
            vec![inv("Git", "Git.Git", "2.44")],
            &[sys("GitKraken", Some("9.0"), Some(r"C:\GitKraken"))],
        );
        assert_eq!(catalog[0].install_location, None);
        assert_eq!(catalog[0].version, "2.44");
    }

    #[test]
    fn boundary_set_covers_hyphen_and_paren() {
        assert!(name_matches_loosely("Foo", "Foo-Bar edition"));
        assert!(name_matches_loosely("Foo", "Foo (x64)"));
        assert!(name_matches_loosely("Foo", "Foo"));
        assert!(!name_matches_loosely("Foo", "Foobar"));
        assert!(!name_matches_loosely("", "anything"));
    }

    #[test]
    fn join_is_total_and_order_preserving() {
        let inventory = vec![
            inv("B App", "b.app", "1.0"),
            inv("A App", "a.app", "2.0"),
            inv("C App", "c.app", "3.0"),
        ];
        let catalog = join(inventory, &[sys("A App", Some("2.1"), None)]);
        assert_eq!(catalog.len(), 3);
        let ids: Vec<&str> = catalog.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(ids, vec!["b.app", "a.app", "c.app"]);
    }

    #[test]
    fn unmatched_entry_falls_back_to_inventory_data() {
        let catalog = join(vec![inv("Ghost", "ghost.app", "0.1")], &[]);
        assert_eq!(catalog[0].version, "0.1");
        assert_eq!(catalog[0].install_location, None);
        assert_eq!(catalog[0].publisher, None);
        assert_eq!(catalog[0].source_key, None);
    }

    #[test]
    fn first_snapshot_match_wins_for_prefix_candidates() {
        let catalog = join(
            vec![inv("Foo", "foo.app", "1.0")],
            &[
                sys("Foo (stable)", Some("1.0"), Some(r"C:\Foo")),
                sys("Foo (beta)", Some("2.0"), Some(r"C:\FooBeta")),
            ],
        );
        assert_eq!(catalog[0].install_location.as_deref(), Some(r"C:\Foo"));
    }
}
