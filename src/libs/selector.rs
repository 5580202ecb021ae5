//! # Selection Resolution
//!
//! Resolves which catalog entries a run operates on. Three entry points,
//! exactly one active per run, chosen by precedence:
//!
//! 1. explicit identifiers (`--id`), exact match, request order;
//! 2. explicit name patterns (`--name`), case-insensitive shell wildcards;
//! 3. the interactive multi-pick, fed the filtered, name-sorted catalog.
//!
//! Store-marketplace entries are filtered out of every mode unless the
//! operator opted in. Unmatched inputs are warnings, never fatal, and an
//! empty selection is a valid way for a run to end.

use colored::Colorize;
use dialoguer::MultiSelect;
use glob::{MatchOptions, Pattern};

use crate::schemas::catalog::AppRecord;
use crate::{log_debug, log_warn};

/// The interactive-pick collaborator. Behind a trait so the pipeline's
/// callers can resolve selections without a terminal attached.
pub trait AppPicker {
    /// Presents `catalog` and returns the chosen entries, in whatever order
    /// the picker produced them. The result is used verbatim.
    fn pick(&self, catalog: &[AppRecord]) -> Vec<AppRecord>;
}

/// `dialoguer`-backed picker used by the real CLI.
pub struct InteractivePicker;

impl AppPicker for InteractivePicker {
    fn pick(&self, catalog: &[AppRecord]) -> Vec<AppRecord> {
        let labels: Vec<String> = catalog
            .iter()
            .map(|app| format!("{}  [{}]  {}", app.name, app.identifier, app.version))
            .collect();
        let chosen = MultiSelect::new()
            .with_prompt("Select applications to refresh (space to toggle, enter to confirm)")
            .items(&labels)
            .interact();
        match chosen {
            Ok(indexes) => indexes.into_iter().map(|i| catalog[i].clone()).collect(),
            Err(e) => {
                log_warn!("[Selector] Interactive pick aborted: {e}");
                Vec::new()
            }
        }
    }
}

/// Resolves the run's selection against the catalog.
pub fn resolve(
    catalog: &[AppRecord],
    ids: &[String],
    names: &[String],
    include_store: bool,
    store_source: &str,
    picker: &dyn AppPicker,
) -> Vec<AppRecord> {
    let eligible: Vec<&AppRecord> = catalog
        .iter()
        .filter(|app| include_store || app.source != store_source)
        .collect();
    if eligible.len() < catalog.len() {
        log_debug!(
            "[Selector] {} store-sourced entries excluded (pass --include-store to keep them)",
            catalog.len() - eligible.len()
        );
    }

    if !ids.is_empty() {
        return resolve_by_identifier(&eligible, ids);
    }
    if !names.is_empty() {
        return resolve_by_name(&eligible, names);
    }

    let mut sorted: Vec<AppRecord> = eligible.into_iter().cloned().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    picker.pick(&sorted)
}

/// Identifier mode: one exact lookup per requested id, in request order.
fn resolve_by_identifier(eligible: &[&AppRecord], ids: &[String]) -> Vec<AppRecord> {
    let mut selection = Vec::new();
    for id in ids {
        match eligible.iter().find(|app| app.identifier == *id) {
            Some(app) => selection.push((*app).clone()),
            None => log_warn!(
                "[Selector] No installed application with identifier '{}'; skipping",
                id.yellow()
            ),
        }
    }
    selection
}

/// Name mode: each requested pattern selects the alphabetically-first
/// catalog entry whose name matches it as a case-insensitive wildcard.
fn resolve_by_name(eligible: &[&AppRecord], names: &[String]) -> Vec<AppRecord> {
    let mut selection = Vec::new();
    for requested in names {
        let mut candidates: Vec<&AppRecord> = eligible
            .iter()
            .copied()
            .filter(|app| wildcard_matches(requested, &app.name))
            .collect();
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        match candidates.first() {
            Some(app) => {
                if candidates.len() > 1 {
                    log_debug!(
                        "[Selector] Pattern '{}' matched {} entries; taking '{}'",
                        requested,
                        candidates.len(),
                        app.name
                    );
                }
                selection.push((*app).clone());
            }
            None => log_warn!(
                "[Selector] No installed application matches name '{}'; skipping",
                requested.yellow()
            ),
        }
    }
    selection
}

/// Case-insensitive shell-style wildcard match (`*`, `?`, `[..]`).
///
/// An unparsable pattern matches nothing; the operator gets a warning
/// instead of a guessed literal comparison.
pub fn wildcard_matches(pattern: &str, name: &str) -> bool {
    let compiled = match Pattern::new(pattern) {
        Ok(p) => p,
        Err(e) => {
            log_warn!("[Selector] Invalid name pattern '{pattern}': {e}");
            return false;
        }
    };
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    compiled.matches_with(name, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn app(name: &str, identifier: &str, source: &str) -> AppRecord {
        AppRecord {
            name: name.to_string(),
            identifier: identifier.to_string(),
            version: "1.0".to_string(),
            source: source.to_string(),
            install_location: None,
            publisher: None,
            source_key: None,
        }
    }

    /// Picker double that records what it was offered and returns a canned
    /// selection.
    struct ScriptedPicker {
        offered: RefCell<Vec<String>>,
        returns: Vec<AppRecord>,
    }

    impl ScriptedPicker {
        fn returning(returns: Vec<AppRecord>) -> Self {
            ScriptedPicker {
                offered: RefCell::new(Vec::new()),
                returns,
            }
        }
    }

    impl AppPicker for ScriptedPicker {
        fn pick(&self, catalog: &[AppRecord]) -> Vec<AppRecord> {
            *self.offered.borrow_mut() = catalog.iter().map(|a| a.name.clone()).collect();
            self.returns.clone()
        }
    }

    fn catalog() -> Vec<AppRecord> {
        vec![
            app("7-Zip", "7zip.7zip", "winget"),
            app("Git", "Git.Git", "winget"),
            app("GitKraken", "Axosoft.GitKraken", "winget"),
            app("Paint", "Microsoft.Paint", "msstore"),
        ]
    }

    #[test]
    fn identifier_mode_takes_precedence_over_names() {
        let picker = ScriptedPicker::returning(Vec::new());
        let selection = resolve(
            &catalog(),
            &["Git.Git".to_string()],
            &["7-Zip".to_string()],
            false,
            "msstore",
            &picker,
        );
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].identifier, "Git.Git");
        // The picker never ran either.
        assert!(picker.offered.borrow().is_empty());
    }

    #[test]
    fn identifier_mode_preserves_request_order() {
        let picker = ScriptedPicker::returning(Vec::new());
        let selection = resolve(
            &catalog(),
            &["Git.Git".to_string(), "7zip.7zip".to_string()],
            &[],
            false,
            "msstore",
            &picker,
        );
        let ids: Vec<&str> = selection.iter().map(|a| a.identifier.as_str()).collect();
        assert_eq!(ids, vec!["Git.Git", "7zip.7zip"]);
    }

    #[test]
    fn unmatched_identifier_is_omitted_not_fatal() {
        let picker = ScriptedPicker::returning(Vec::new());
        let selection = resolve(
            &catalog(),
            &["nonexistent.pkg".to_string()],
            &[],
            false,
            "msstore",
            &picker,
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn name_mode_matches_wildcards_case_insensitively() {
        let picker = ScriptedPicker::returning(Vec::new());
        let selection = resolve(
            &catalog(),
            &[],
            &["git*".to_string(), "7-z?p".to_string()],
            false,
            "msstore",
            &picker,
        );
        let names: Vec<&str> = selection.iter().map(|a| a.name.as_str()).collect();
        // "git*" matches Git and GitKraken; candidates sort by name, so Git
        // wins. "7-z?p" matches 7-Zip.
        assert_eq!(names, vec!["Git", "7-Zip"]);
    }

    #[test]
    fn store_entries_are_filtered_from_every_mode_unless_included() {
        let picker = ScriptedPicker::returning(Vec::new());
        let excluded = resolve(
            &catalog(),
            &["Microsoft.Paint".to_string()],
            &[],
            false,
            "msstore",
            &picker,
        );
        assert!(excluded.is_empty());

        let included = resolve(
            &catalog(),
            &["Microsoft.Paint".to_string()],
            &[],
            true,
            "msstore",
            &picker,
        );
        assert_eq!(included.len(), 1);
    }

    #[test]
    fn interactive_mode_gets_filtered_name_sorted_catalog() {
        let picker = ScriptedPicker::returning(vec![app("Git", "Git.Git", "winget")]);
        let selection = resolve(&catalog(), &[], &[], false, "msstore", &picker);
        assert_eq!(
            *picker.offered.borrow(),
            vec!["7-Zip", "Git", "GitKraken"],
            "picker input must be store-filtered and sorted by name"
        );
        assert_eq!(selection.len(), 1);
        assert_eq!(selection[0].identifier, "Git.Git");
    }

    #[test]
    fn wildcard_semantics() {
        assert!(wildcard_matches("git*", "GitKraken"));
        assert!(wildcard_matches("GIT", "git"));
        assert!(wildcard_matches("?-Zip", "7-Zip"));
        assert!(!wildcard_matches("git", "GitKraken"));
        assert!(!wildcard_matches("[", "anything"));
    }
}
