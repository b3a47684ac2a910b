#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Admission record, institution grouping, and report column types.
//!
//! A provincial admission report lists one row per program group: the
//! institution code and name, the group code, and the plan/admitted counts
//! together with the cutoff score and rank of the last admitted applicant.
//! Parsed rows are collected into [`InstitutionGroups`] keyed by
//! institution name, then ranked into [`RankedInstitution`] values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// One program group's admission statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRecord {
    /// Five-digit institution code (e.g., `"10001"`). Kept as a string so
    /// leading zeros survive.
    pub code: String,
    /// Three-digit program group code (e.g., `"206"`).
    pub group_code: String,
    /// Number of planned admissions.
    pub plan_num: u32,
    /// Number of applicants actually admitted.
    pub admit_num: u32,
    /// Score of the lowest admitted applicant.
    pub min_score: u32,
    /// Provincial rank of the lowest admitted applicant.
    pub min_rank: u32,
}

/// A single data line after parsing: the institution name it belongs to
/// and the record it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRow {
    /// Cleaned institution name.
    pub name: String,
    /// The program group record.
    pub record: AdmissionRecord,
}

/// Records grouped by institution name.
///
/// Names keep the order in which they were first seen, and records for an
/// existing name are appended rather than replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionGroups(IndexMap<String, Vec<AdmissionRecord>>);

impl InstitutionGroups {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` to the group for `name`, creating the group if
    /// this is the first record seen for that institution.
    pub fn insert(&mut self, name: String, record: AdmissionRecord) {
        self.0.entry(name).or_default().push(record);
    }

    /// Number of distinct institutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no institution has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of records across all institutions.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Returns the records for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[AdmissionRecord]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Iterates institutions in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<AdmissionRecord>)> {
        self.0.iter()
    }
}

impl IntoIterator for InstitutionGroups {
    type Item = (String, Vec<AdmissionRecord>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<AdmissionRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<ParsedRow> for InstitutionGroups {
    fn extend<T: IntoIterator<Item = ParsedRow>>(&mut self, iter: T) {
        for row in iter {
            self.insert(row.name, row.record);
        }
    }
}

impl FromIterator<ParsedRow> for InstitutionGroups {
    fn from_iter<T: IntoIterator<Item = ParsedRow>>(iter: T) -> Self {
        let mut groups = Self::new();
        groups.extend(iter);
        groups
    }
}

/// An institution after ranking: its records sorted by cutoff score,
/// highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedInstitution {
    /// Institution name.
    pub name: String,
    /// Lowest `min_score` across all of this institution's records.
    pub min_score: u32,
    /// Records ordered by descending `min_score`.
    pub records: Vec<AdmissionRecord>,
}

/// Columns of the rendered ranking table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ReportColumn {
    #[strum(serialize = "院校名称")]
    Institution,
    #[strum(serialize = "专业组代码")]
    GroupCode,
    #[strum(serialize = "计划数")]
    PlanNum,
    #[strum(serialize = "投档人数")]
    AdmitNum,
    #[strum(serialize = "投档最低分")]
    MinScore,
    #[strum(serialize = "投档最低排位")]
    MinRank,
}

impl ReportColumn {
    pub const ALL: [Self; 6] = [
        Self::Institution,
        Self::GroupCode,
        Self::PlanNum,
        Self::AdmitNum,
        Self::MinScore,
        Self::MinRank,
    ];

    /// Width of the dash run under this column's header in the markdown
    /// separator line.
    #[must_use]
    pub const fn separator_width(self) -> usize {
        match self {
            Self::Institution => 10,
            Self::GroupCode | Self::MinScore => 12,
            Self::PlanNum => 8,
            Self::AdmitNum => 10,
            Self::MinRank => 13,
        }
    }
}
