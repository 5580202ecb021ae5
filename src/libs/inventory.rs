//! # Package-Manager Inventory
//!
//! Fetches the raw `winget list` output and parses it into structured
//! [`InventoryRecord`]s.
//!
//! The listing is free-text tabular output, not a machine format. Columns
//! are aligned with whitespace padding, so parsing is heuristic: a run of
//! two or more whitespace characters separates columns, and only lines that
//! split into exactly 4 or 5 columns are accepted. Anything else (progress
//! spinners, wrapped names, continuation fragments) is dropped, since a silently
//! skipped line is always safer than a guessed parse.

use std::process::Command;

use colored::Colorize;

use crate::errors::RunError;
use crate::schemas::catalog::InventoryRecord;
use crate::{log_debug, log_warn};

/// How a single listing line parsed.
///
/// Keeping `Malformed` as an explicit variant (rather than filtering inline)
/// makes the drop-the-line fallback a first-class, testable case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Four columns: name, identifier, version, source.
    Packed(InventoryRecord),
    /// Five columns: name, identifier, version, available-version, source.
    /// The available-version column is discarded during parsing.
    PackedWithAvailable(InventoryRecord),
    /// Fewer than four columns, or more than five. Dropped.
    Malformed,
}

/// Runs the listing command and returns its raw stdout.
///
/// This call is read-only and therefore runs live even under `--dry-run`;
/// dry-run must reach identical decisions, and decisions start here. A
/// spawn failure means the package manager itself is missing, which is
/// fatal for the run.
pub fn fetch_listing(winget_path: &str) -> Result<String, RunError> {
    log_debug!(
        "[Inventory] Executing: {} {}",
        winget_path.cyan().bold(),
        "list --accept-source-agreements".cyan()
    );

    let output = Command::new(winget_path)
        .args(["list", "--accept-source-agreements"])
        .output()
        .map_err(|e| {
            log_debug!("[Inventory] Failed to spawn listing command: {e}");
            RunError::MissingTool(winget_path.to_string())
        })?;

    if !output.status.success() {
        // The listing occasionally exits non-zero while still printing a
        // usable table (e.g. source-update hiccups). The empty-inventory
        // check downstream is the real gate, so only warn here.
        log_warn!(
            "[Inventory] Listing command exited with code {}",
            output.status.code().unwrap_or(-1)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parses the raw listing text into deduplicated inventory records.
///
/// - the fixed two-line header (title + separator rule) is skipped;
/// - any line consisting solely of three or more dashes is skipped wherever
///   it occurs;
/// - remaining lines are split on runs of 2+ whitespace and accepted only
///   as 4 or 5 columns;
/// - duplicate identifiers are collapsed, first occurrence wins, with the
///   original relative order otherwise preserved.
///
/// Empty input yields an empty vector, not an error; the caller decides
/// whether an empty inventory is fatal.
pub fn parse_listing(raw: &str) -> Vec<InventoryRecord> {
    let mut records: Vec<InventoryRecord> = Vec::new();
    let mut seen_identifiers: Vec<String> = Vec::new();

    for line in raw.lines().skip(2) {
        if is_separator_rule(line) {
            continue;
        }
        let record = match parse_line(line) {
            ParsedLine::Packed(r) | ParsedLine::PackedWithAvailable(r) => r,
            ParsedLine::Malformed => {
                if !line.trim().is_empty() {
                    log_debug!("[Inventory] Dropping unparseable line: {:?}", line.trim());
                }
                continue;
            }
        };
        if seen_identifiers.iter().any(|id| *id == record.identifier) {
            log_debug!(
                "[Inventory] Duplicate identifier '{}' dropped (first occurrence wins)",
                record.identifier
            );
            continue;
        }
        seen_identifiers.push(record.identifier.clone());
        records.push(record);
    }

    log_debug!("[Inventory] Parsed {} inventory records", records.len());
    records
}

/// Classifies one listing line.
pub fn parse_line(line: &str) -> ParsedLine {
    let columns = split_columns(line);
    match columns.as_slice() {
        [name, identifier, version, source] => ParsedLine::Packed(InventoryRecord {
            name: name.clone(),
            identifier: identifier.clone(),
            version: version.clone(),
            source: source.clone(),
        }),
        [name, identifier, version, _available, source] => {
            ParsedLine::PackedWithAvailable(InventoryRecord {
                name: name.clone(),
                identifier: identifier.clone(),
                version: version.clone(),
                source: source.clone(),
            })
        }
        _ => ParsedLine::Malformed,
    }
}

/// Splits a listing line on runs of two or more whitespace characters.
///
/// Single spaces stay inside a column; display names like "Microsoft Edge"
/// are one column. Names that themselves contain 2+ consecutive spaces will
/// over-split and the line falls out as `Malformed`; that is the intended
/// safe fallback.
pub fn split_columns(line: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut field = String::new();
    let mut pending_ws = String::new();

    for ch in line.trim().chars() {
        if ch.is_whitespace() {
            pending_ws.push(ch);
            continue;
        }
        if pending_ws.chars().count() >= 2 {
            if !field.is_empty() {
                columns.push(std::mem::take(&mut field));
            }
        } else {
            field.push_str(&pending_ws);
        }
        pending_ws.clear();
        field.push(ch);
    }
    if !field.is_empty() {
        columns.push(field);
    }
    columns
}

/// A line that is nothing but a horizontal rule of dashes (3+).
fn is_separator_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() >= 3 && trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Name                 Id               Version  Source
------------------------------------------------------
7-Zip                7zip.7zip        22.00    winget
Microsoft Edge       Microsoft.Edge   126.0    1.2.3    winget
Paint                Microsoft.Paint  11.0     msstore
Orphaned Thing       orphan.thing     1.0
";

    #[test]
    fn parses_four_and_five_column_lines() {
        let records = parse_listing(LISTING);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "7-Zip");
        assert_eq!(records[0].identifier, "7zip.7zip");
        assert_eq!(records[0].version, "22.00");
        assert_eq!(records[0].source, "winget");
        // Five-column line: the available-version column is discarded.
        assert_eq!(records[1].name, "Microsoft Edge");
        assert_eq!(records[1].version, "126.0");
        assert_eq!(records[1].source, "winget");
    }

    #[test]
    fn drops_lines_with_fewer_than_four_columns() {
        let records = parse_listing(LISTING);
        assert!(records.iter().all(|r| r.identifier != "orphan.thing"));
    }

    #[test]
    fn skips_header_and_separator_rules_anywhere() {
        let raw = "\
Name      Id        Version  Source
---
7-Zip     7zip.7zip  22.00   winget
-----
Git       Git.Git    2.45    winget
";
        let records = parse_listing(raw);
        let ids: Vec<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["7zip.7zip", "Git.Git"]);
    }

    #[test]
    fn dedupes_identifiers_first_seen_wins() {
        let raw = "\
Name      Id         Version  Source
------------------------------------
7-Zip     7zip.7zip  22.00    winget
7-Zip     7zip.7zip  21.07    winget
";
        let records = parse_listing(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "22.00");
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert!(parse_listing("").is_empty());
        assert!(parse_listing("Header only\n").is_empty());
    }

    #[test]
    fn reparsing_is_idempotent() {
        let first = parse_listing(LISTING);
        let second = parse_listing(LISTING);
        assert_eq!(first, second);
    }

    #[test]
    fn split_keeps_single_spaces_inside_a_column() {
        let columns = split_columns("Microsoft Visual Studio  Microsoft.VS  17.9  winget");
        assert_eq!(
            columns,
            vec!["Microsoft Visual Studio", "Microsoft.VS", "17.9", "winget"]
        );
    }

    #[test]
    fn malformed_is_an_explicit_variant() {
        assert_eq!(parse_line("just three  loose  columns"), ParsedLine::Malformed);
        assert!(matches!(
            parse_line("A  b.b  1.0  winget"),
            ParsedLine::Packed(_)
        ));
        assert!(matches!(
            parse_line("A  b.b  1.0  2.0  winget"),
            ParsedLine::PackedWithAvailable(_)
        ));
    }
}
