//! Rule table for a specific admission report layout.
//!
//! Everything that is specific to one report's layout (the row pattern,
//! the header/footer lines to ignore, the extraction artifacts to clean up,
//! and the report title) lives in a TOML file. The rules for the Guangdong
//! 2025 report are baked into the binary at compile time via
//! [`include_str!`]; other layouts can be loaded from disk.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::ReportError;

/// Rules for the Guangdong 2025 undergraduate general track report.
const GUANGDONG_2025_TOML: &str = include_str!("../rules/guangdong_2025.toml");

/// Named capture groups the row pattern must define.
pub const REQUIRED_GROUPS: [&str; 7] = [
    "code",
    "name",
    "group_code",
    "plan_num",
    "admit_num",
    "min_score",
    "min_rank",
];

const fn default_preview_count() -> usize {
    10
}

/// Raw rule table as written in TOML.
#[derive(Debug, Deserialize)]
struct RuleTable {
    title: String,
    subtitle: String,
    #[serde(default = "default_preview_count")]
    preview_count: usize,
    row_pattern: String,
    #[serde(default)]
    skip_contains: Vec<String>,
    #[serde(default)]
    skip_prefixes: Vec<String>,
    #[serde(default)]
    name_suffix_blacklist: Vec<char>,
}

/// Compiled parsing and rendering rules.
#[derive(Debug, Clone)]
pub struct ParseRules {
    /// Markdown title (without the leading `#`).
    pub title: String,
    /// Line rendered between the title and the table.
    pub subtitle: String,
    /// How many institutions the console preview shows.
    pub preview_count: usize,
    /// Lines containing any of these are never data rows.
    pub skip_contains: Vec<String>,
    /// Lines starting with any of these are never data rows.
    pub skip_prefixes: Vec<String>,
    /// A name ending in one of these characters loses that one character.
    pub name_suffix_blacklist: Vec<char>,
    row: Regex,
}

impl ParseRules {
    /// Parses and compiles a rule table from TOML source.
    ///
    /// # Errors
    ///
    /// * [`ReportError::Rules`] if the TOML is malformed
    /// * [`ReportError::Regex`] if `row_pattern` does not compile
    /// * [`ReportError::MissingCaptureGroup`] if `row_pattern` lacks one of
    ///   the [`REQUIRED_GROUPS`]
    pub fn from_toml(toml_str: &str) -> Result<Self, ReportError> {
        let table: RuleTable =
            toml::de::from_str(toml_str).map_err(|e| ReportError::Rules(e.to_string()))?;

        let row = Regex::new(&table.row_pattern)?;
        let names: Vec<&str> = row.capture_names().flatten().collect();
        if let Some(missing) = REQUIRED_GROUPS.into_iter().find(|g| !names.contains(g)) {
            return Err(ReportError::MissingCaptureGroup(missing));
        }

        Ok(Self {
            title: table.title,
            subtitle: table.subtitle,
            preview_count: table.preview_count,
            skip_contains: table.skip_contains,
            skip_prefixes: table.skip_prefixes,
            name_suffix_blacklist: table.name_suffix_blacklist,
            row,
        })
    }

    /// Loads a rule table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be read, or any error
    /// from [`Self::from_toml`].
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path)?;
        log::info!("Loaded rule table from {}", path.display());
        Self::from_toml(&contents)
    }

    /// The embedded rules for the Guangdong 2025 report.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded table itself is invalid.
    pub fn guangdong_2025() -> Result<Self, ReportError> {
        Self::from_toml(GUANGDONG_2025_TOML)
    }

    /// The compiled row pattern.
    #[must_use]
    pub const fn row_pattern(&self) -> &Regex {
        &self.row
    }

    /// Whether a trimmed line is a known non-data line (page titles, table
    /// headers, page delimiters).
    #[must_use]
    pub fn is_skipped(&self, line: &str) -> bool {
        self.skip_contains.iter().any(|m| line.contains(m.as_str()))
            || self.skip_prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    /// Trims `name`, drops a single trailing blacklisted character, and
    /// trims again.
    #[must_use]
    pub fn clean_name<'a>(&self, name: &'a str) -> &'a str {
        let name = name.trim();
        let name = name
            .strip_suffix(|c: char| self.name_suffix_blacklist.contains(&c))
            .unwrap_or(name);
        name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_rules_compile() {
        let rules = ParseRules::guangdong_2025().unwrap();
        assert_eq!(rules.preview_count, 10);
        assert_eq!(rules.name_suffix_blacklist.len(), 8);
        assert!(rules.title.starts_with("广东省2025年"));
    }

    #[test]
    fn skips_header_and_delimiter_lines() {
        let rules = ParseRules::guangdong_2025().unwrap();
        assert!(rules.is_skipped("院校代码 院校名称 专业组代码 计划数 投档人数"));
        assert!(rules.is_skipped("=== 第 3 页 ==="));
        assert!(rules.is_skipped("--- 表格 (共 1 个) ---"));
        assert!(rules.is_skipped("---"));
        assert!(!rules.is_skipped("10001 北京大学 206 34 35 689 99"));
    }

    #[test]
    fn strips_one_blacklisted_suffix() {
        let rules = ParseRules::guangdong_2025().unwrap();
        assert_eq!(rules.clean_name("广东海洋大学育"), "广东海洋大学");
        assert_eq!(rules.clean_name("某某大学东广"), "某某大学东");
        assert_eq!(rules.clean_name(" 北京大学 "), "北京大学");
        assert_eq!(rules.clean_name("院"), "");
    }

    #[test]
    fn rejects_pattern_without_required_groups() {
        let toml = r#"
            title = "t"
            subtitle = "s"
            row_pattern = '^(?P<code>\d{5})\s+(?P<name>.+)$'
        "#;
        let err = ParseRules::from_toml(toml).unwrap_err();
        assert!(matches!(err, ReportError::MissingCaptureGroup("group_code")));
    }

    #[test]
    fn rejects_invalid_pattern() {
        let toml = r#"
            title = "t"
            subtitle = "s"
            row_pattern = '(unclosed'
        "#;
        let err = ParseRules::from_toml(toml).unwrap_err();
        assert!(matches!(err, ReportError::Regex(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ParseRules::from_toml("title = ").unwrap_err();
        assert!(matches!(err, ReportError::Rules(_)));
    }

    #[test]
    fn optional_fields_default() {
        let toml = r#"
            title = "t"
            subtitle = "s"
            row_pattern = '^(?P<code>\d{5}) (?P<name>\S+) (?P<group_code>\d{3}) (?P<plan_num>\d+) (?P<admit_num>\d+) (?P<min_score>\d+) (?P<min_rank>\d+)$'
        "#;
        let rules = ParseRules::from_toml(toml).unwrap();
        assert_eq!(rules.preview_count, 10);
        assert!(rules.skip_contains.is_empty());
        assert!(!rules.is_skipped("院校代码"));
        assert_eq!(rules.clean_name("广东海洋大学育"), "广东海洋大学育");
    }
}
