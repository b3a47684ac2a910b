#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Admission report parsing, ranking, and markdown rendering.
//!
//! Reads the text dump written by `admission_rank_pdf`, picks out data rows
//! with the configurable [`rules::ParseRules`] ([`parse`]), ranks
//! institutions by their lowest cutoff score ([`sort`]), and renders the
//! result as a markdown table ([`markdown`]).
//!
//! The primary entry point is [`run_report`].

pub mod markdown;
pub mod parse;
pub mod rules;
pub mod sort;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use admission_rank_models::RankedInstitution;

use crate::rules::ParseRules;

/// Errors that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rule table could not be decoded.
    #[error("Invalid rule table: {0}")]
    Rules(String),

    /// The configured row pattern failed to compile.
    #[error("Invalid row pattern: {0}")]
    Regex(#[from] regex::Error),

    /// The configured row pattern lacks a required named group.
    #[error("Row pattern is missing the `{0}` capture group")]
    MissingCaptureGroup(&'static str),

    /// No institution could be parsed from the input.
    #[error("no admission data could be parsed from the input")]
    NoData,
}

/// Outcome of a successful report run.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    /// Where the markdown was written.
    pub output: PathBuf,
    /// Number of institutions in the report.
    pub institutions: usize,
    /// Number of program group rows in the report.
    pub records: usize,
    /// The ranking that was rendered, for previews.
    pub ranked: Vec<RankedInstitution>,
}

/// Writes `contents` to `path` through a `.tmp` sibling and a rename.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ReportError> {
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Renders `ranked` with the title from `rules` and writes it to `output`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be written.
pub fn write_report(
    ranked: &[RankedInstitution],
    rules: &ParseRules,
    output: &Path,
) -> Result<(), ReportError> {
    let md = markdown::render_markdown(ranked, &rules.title, &rules.subtitle);
    write_atomic(output, &md)?;
    log::info!("Saved report to {}", output.display());
    Ok(())
}

/// Parses the dump at `input`, ranks the institutions, and writes the
/// markdown report to `output`.
///
/// # Errors
///
/// * [`ReportError::Io`] if the input cannot be read or the output cannot
///   be written
/// * [`ReportError::NoData`] if no institution was parsed; nothing is
///   written in that case
pub fn run_report(
    input: &Path,
    output: &Path,
    rules: &ParseRules,
) -> Result<ReportSummary, ReportError> {
    let groups = parse::parse_file(input, rules)?;
    log::info!(
        "Parsed {} institution(s) from {}",
        groups.len(),
        input.display()
    );

    if groups.is_empty() {
        return Err(ReportError::NoData);
    }

    let records = groups.record_count();
    let ranked = sort::rank(groups);
    write_report(&ranked, rules, output)?;

    Ok(ReportSummary {
        output: output.to_path_buf(),
        institutions: ranked.len(),
        records,
        ranked,
    })
}
