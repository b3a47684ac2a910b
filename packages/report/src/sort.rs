//! Ranking of institutions by their lowest cutoff score.

use std::cmp::Reverse;

use admission_rank_models::{AdmissionRecord, InstitutionGroups, RankedInstitution};

/// Lowest `min_score` across `records`, or `None` when there are none.
#[must_use]
pub fn lowest_score(records: &[AdmissionRecord]) -> Option<u32> {
    records.iter().map(|r| r.min_score).min()
}

/// Ranks institutions by their lowest cutoff score, highest first, and
/// orders each institution's records by cutoff score, highest first.
///
/// Both sorts are stable: institutions with the same lowest score keep the
/// order in which they were first seen, and records with the same score
/// keep their parse order. Institutions without records are dropped.
#[must_use]
pub fn rank(groups: InstitutionGroups) -> Vec<RankedInstitution> {
    let mut ranked: Vec<RankedInstitution> = groups
        .into_iter()
        .filter_map(|(name, mut records)| {
            let min_score = lowest_score(&records)?;
            records.sort_by_key(|r| Reverse(r.min_score));
            Some(RankedInstitution {
                name,
                min_score,
                records,
            })
        })
        .collect();

    ranked.sort_by_key(|inst| Reverse(inst.min_score));

    ranked
}
