//! Line-by-line parsing of the extracted report text.
//!
//! Applies the rule table's row pattern to each trimmed line. Each match
//! becomes a [`ParsedRow`]; everything else (page titles, table headers,
//! page delimiters, and rows whose numbers do not fit) is dropped without
//! complaint, since extracted PDF text is noisy by nature.

use std::path::Path;

use admission_rank_models::{AdmissionRecord, InstitutionGroups, ParsedRow};

use crate::ReportError;
use crate::rules::ParseRules;

/// Parses a single line into a row, or `None` if it is not a data row.
#[must_use]
pub fn parse_line(line: &str, rules: &ParseRules) -> Option<ParsedRow> {
    let line = line.trim();
    if line.is_empty() || rules.is_skipped(line) {
        return None;
    }

    let caps = rules.row_pattern().captures(line)?;
    let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    let number = |name: &str| field(name).parse::<u32>().ok();

    let name = rules.clean_name(field("name"));
    if name.is_empty() {
        return None;
    }

    Some(ParsedRow {
        name: name.to_owned(),
        record: AdmissionRecord {
            code: field("code").to_owned(),
            group_code: field("group_code").to_owned(),
            plan_num: number("plan_num")?,
            admit_num: number("admit_num")?,
            min_score: number("min_score")?,
            min_rank: number("min_rank")?,
        },
    })
}

/// Parses the full dump text into records grouped by institution.
#[must_use]
pub fn parse_text(text: &str, rules: &ParseRules) -> InstitutionGroups {
    let mut groups = InstitutionGroups::new();
    let mut skipped = 0_usize;

    for line in text.lines() {
        match parse_line(line, rules) {
            Some(row) => groups.insert(row.name, row.record),
            None if !line.trim().is_empty() => skipped += 1,
            None => {}
        }
    }

    log::debug!(
        "Parsed {} record(s) for {} institution(s), skipped {skipped} non-data line(s)",
        groups.record_count(),
        groups.len()
    );

    groups
}

/// Reads and parses the dump file at `path`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be read.
pub fn parse_file(path: &Path, rules: &ParseRules) -> Result<InstitutionGroups, ReportError> {
    let text = std::fs::read_to_string(path)?;
    log::debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(parse_text(&text, rules))
}
