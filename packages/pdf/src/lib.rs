#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-page PDF text and table extraction for admission reports.
//!
//! Admission statistics are only published as PDF reports.  This crate
//! pulls the text out of every page using pure-Rust text extraction
//! ([`pdf_extract`]), recovers tabular regions from the page layout
//! ([`tables`]), and writes a plain-text dump that the report parser
//! consumes.
//!
//! Extraction finishes completely before anything is written, and the dump
//! is written through a temporary file, so a failed run never leaves a
//! partial dump behind.

pub mod tables;

use std::ffi::OsString;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::tables::Table;

/// Errors specific to PDF extraction.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The input PDF does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single extracted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfPage {
    /// 1-based page number.
    pub number: usize,
    /// Extracted text. Empty when the page has no text layer.
    pub text: String,
    /// Tables recovered from the page text.
    pub tables: Vec<Table>,
}

impl PdfPage {
    /// Builds a page from its raw text, detecting tables along the way.
    #[must_use]
    pub fn from_text(number: usize, text: String) -> Self {
        let tables = tables::detect(&text);
        Self {
            number,
            text,
            tables,
        }
    }

    /// Whether the page yielded any non-whitespace text.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// The result of extracting an entire document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Path the document was read from.
    pub source: PathBuf,
    /// Pages in document order.
    pub pages: Vec<PdfPage>,
}

/// Returns the delimiter line written before each page's text in the dump.
#[must_use]
pub fn page_marker(number: usize) -> String {
    format!("=== 第 {number} 页 ===")
}

/// Extracts every page of the PDF at `path`.
///
/// # Errors
///
/// * [`PdfError::NotFound`] if `path` does not exist
/// * [`PdfError::Io`] if the file cannot be read
/// * [`PdfError::Extraction`] if the PDF cannot be decoded
pub fn extract(path: &Path) -> Result<Extraction, PdfError> {
    if !path.exists() {
        return Err(PdfError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    extract_from_mem(&bytes, path)
}

/// Extracts every page from an in-memory PDF. `source` is recorded on the
/// returned [`Extraction`] for reporting only.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] if the PDF cannot be decoded.
pub fn extract_from_mem(bytes: &[u8], source: &Path) -> Result<Extraction, PdfError> {
    // `pdf_extract` panics on some malformed documents instead of erroring.
    let texts = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| PdfError::Extraction("PDF extraction panicked (malformed document)".to_owned()))?
    .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    let pages: Vec<PdfPage> = texts
        .into_iter()
        .enumerate()
        .map(|(idx, text)| PdfPage::from_text(idx + 1, text))
        .collect();

    log::info!(
        "Extracted {} page(s) from {} ({} with text)",
        pages.len(),
        source.display(),
        pages.iter().filter(|p| p.has_text()).count()
    );

    Ok(Extraction {
        source: source.to_path_buf(),
        pages,
    })
}

/// Renders the plain-text dump: each page with text is introduced by its
/// [`page_marker`] line. Pages without text are left out.
#[must_use]
pub fn render_dump(extraction: &Extraction) -> String {
    let mut dump = String::new();

    for page in extraction.pages.iter().filter(|p| p.has_text()) {
        dump.push('\n');
        dump.push_str(&page_marker(page.number));
        dump.push('\n');
        dump.push_str(&page.text);
        dump.push('\n');
    }

    dump
}

/// Returns `<path>.tmp`, the staging file for an atomic write to `path`.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes the dump for `extraction` to `output` and returns the number of
/// characters written.
///
/// Uses an atomic write pattern (write to `.tmp`, then rename).
///
/// # Errors
///
/// Returns [`PdfError::Io`] if the file cannot be written.
pub fn write_dump(extraction: &Extraction, output: &Path) -> Result<usize, PdfError> {
    let dump = render_dump(extraction);
    let tmp_path = tmp_path_for(output);

    std::fs::write(&tmp_path, &dump)?;
    std::fs::rename(&tmp_path, output)?;

    let chars = dump.chars().count();
    log::info!("Saved {chars} characters to {}", output.display());

    Ok(chars)
}

/// Renders the document header printed before the page listings.
#[must_use]
pub fn document_summary(extraction: &Extraction) -> String {
    format!(
        "PDF info:\n- Pages: {}\n- Path: {}\n{}",
        extraction.pages.len(),
        extraction.source.display(),
        "-".repeat(50)
    )
}

/// Renders one page for the console: its text (or a notice when there is
/// none) followed by any recovered tables.
#[must_use]
pub fn page_listing(page: &PdfPage) -> String {
    let mut out = String::new();

    // Writing to a `String` is infallible.
    let _ = writeln!(out, "\n{}", page_marker(page.number));

    if page.has_text() {
        out.push_str(&page.text);
        out.push('\n');
    } else {
        out.push_str("(no extractable text on this page)\n");
    }

    if !page.tables.is_empty() {
        let _ = writeln!(out, "\n--- Tables ({}) ---", page.tables.len());
        for (idx, table) in page.tables.iter().enumerate() {
            let _ = writeln!(out, "\nTable {}:", idx + 1);
            for row in table.rows.iter().filter(|r| !r.is_empty()) {
                out.push_str(&tables::format_row(row));
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "admission_rank_pdf_{name}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_extraction() -> Extraction {
        Extraction {
            source: PathBuf::from("report.pdf"),
            pages: vec![
                PdfPage::from_text(1, "10001 北京大学 206 34 35 689 99".to_owned()),
                PdfPage::from_text(2, "   \n".to_owned()),
                PdfPage::from_text(3, "10003 清华大学 201 20 20 690 80".to_owned()),
            ],
        }
    }

    #[test]
    fn dump_labels_pages_and_skips_blank_ones() {
        let dump = render_dump(&sample_extraction());
        assert_eq!(
            dump,
            "\n=== 第 1 页 ===\n10001 北京大学 206 34 35 689 99\n\
             \n=== 第 3 页 ===\n10003 清华大学 201 20 20 690 80\n"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = scratch_dir("missing");
        let err = extract(&dir.join("does_not_exist.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::NotFound(_)));
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        let err = extract_from_mem(b"definitely not a pdf", Path::new("x.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::Extraction(_)));
    }

    #[test]
    fn write_dump_replaces_target_and_leaves_no_tmp() {
        let dir = scratch_dir("write");
        let output = dir.join("extracted_content.txt");
        std::fs::write(&output, "stale").unwrap();

        let extraction = sample_extraction();
        let chars = write_dump(&extraction, &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, render_dump(&extraction));
        assert_eq!(chars, written.chars().count());
        assert!(!tmp_path_for(&output).exists());
    }

    #[test]
    fn listing_notes_pages_without_text() {
        let page = PdfPage::from_text(7, String::new());
        let listing = page_listing(&page);
        assert!(listing.contains("=== 第 7 页 ==="));
        assert!(listing.contains("no extractable text"));
        assert!(!listing.contains("Tables"));
    }

    #[test]
    fn listing_prints_tables() {
        let page = PdfPage::from_text(1, "a b c\nd e f g".to_owned());
        let listing = page_listing(&page);
        assert!(listing.contains("--- Tables (1) ---"));
        assert!(listing.contains("a | b | c | \n"));
        assert!(listing.contains("d | e | f | g\n"));
    }

    #[test]
    fn summary_reports_page_count() {
        let summary = document_summary(&sample_extraction());
        assert!(summary.contains("- Pages: 3"));
        assert!(summary.contains("- Path: report.pdf"));
    }
}
