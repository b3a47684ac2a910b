//! The extract and report passes, with their console output.
//!
//! Each pass catches its own error, logs it, and prints a failure line so
//! that `run` can continue with the next pass.

use std::path::Path;

use admission_rank_pdf::{PdfError, document_summary, page_listing, write_dump};
use admission_rank_report::rules::ParseRules;
use admission_rank_report::{ReportError, ReportSummary, markdown, run_report};

/// Extracts `input` into the text dump at `output`.
pub fn extract(input: &Path, output: &Path) {
    println!("Extracting PDF content...");

    match try_extract(input, output) {
        Ok(chars) => println!("\n✅ Extracted {chars} characters of content"),
        Err(e) => {
            log::error!("Failed to extract {}: {e}", input.display());
            println!("❌ Extraction failed");
        }
    }
}

fn try_extract(input: &Path, output: &Path) -> Result<usize, PdfError> {
    let extraction = admission_rank_pdf::extract(input)?;

    println!("{}", document_summary(&extraction));
    for page in &extraction.pages {
        print!("{}", page_listing(page));
    }

    let chars = write_dump(&extraction, output)?;
    println!("\nExtracted content saved to: {}", output.display());

    Ok(chars)
}

/// Parses the dump at `input` and writes the ranked report to `output`.
pub fn report(input: &Path, output: &Path, rules_path: Option<&Path>) {
    println!("Processing admission data...");

    match try_report(input, output, rules_path) {
        Ok((summary, preview_count)) => {
            println!(
                "Parsed {} institution(s) with {} program group(s)",
                summary.institutions, summary.records
            );
            println!(
                "Sorting complete! Report saved to {}",
                summary.output.display()
            );
            println!();
            print!("{}", markdown::render_preview(&summary.ranked, preview_count));
        }
        Err(ReportError::NoData) => {
            log::warn!("No institutions parsed from {}", input.display());
            println!("No data could be parsed, please check the input format");
        }
        Err(e) => {
            log::error!("Failed to build report from {}: {e}", input.display());
            println!("❌ Report failed");
        }
    }
}

fn try_report(
    input: &Path,
    output: &Path,
    rules_path: Option<&Path>,
) -> Result<(ReportSummary, usize), ReportError> {
    let rules = match rules_path {
        Some(path) => ParseRules::load(path)?,
        None => ParseRules::guangdong_2025()?,
    };

    let summary = run_report(input, output, &rules)?;
    Ok((summary, rules.preview_count))
}
