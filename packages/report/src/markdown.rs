//! Markdown and console rendering of ranked institutions.

use std::fmt::Write as _;

use admission_rank_models::{RankedInstitution, ReportColumn};

fn header_row() -> String {
    let cells: Vec<String> = ReportColumn::ALL.iter().map(ToString::to_string).collect();
    format!("| {} |", cells.join(" | "))
}

fn separator_row() -> String {
    let cells: Vec<String> = ReportColumn::ALL
        .iter()
        .map(|c| "-".repeat(c.separator_width()))
        .collect();
    format!("|{}|", cells.join("|"))
}

/// Renders the ranking as a GitHub-flavored markdown table under a title
/// and subtitle.
///
/// The institution cell is only filled on the first row of each
/// institution's block so the grouping stays visible without repeating
/// the name.
#[must_use]
pub fn render_markdown(ranked: &[RankedInstitution], title: &str, subtitle: &str) -> String {
    let mut md = String::new();

    // Writing to a `String` is infallible.
    let _ = write!(md, "# {title}\n\n{subtitle}\n\n");
    md.push_str(&header_row());
    md.push('\n');
    md.push_str(&separator_row());
    md.push('\n');

    for inst in ranked {
        for (idx, r) in inst.records.iter().enumerate() {
            let name = if idx == 0 { inst.name.as_str() } else { "" };
            let _ = writeln!(
                md,
                "| {name} | {} | {} | {} | {} | {} |",
                r.group_code, r.plan_num, r.admit_num, r.min_score, r.min_rank
            );
        }
    }

    md
}

/// Renders a short console preview of the top `count` institutions.
#[must_use]
pub fn render_preview(ranked: &[RankedInstitution], count: usize) -> String {
    let mut out = format!("=== Top {count} institutions ===\n");

    for (idx, inst) in ranked.iter().take(count).enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} (lowest score: {})",
            idx + 1,
            inst.name,
            inst.min_score
        );
        for r in &inst.records {
            let _ = writeln!(
                out,
                "   group {}: {} points (rank {})",
                r.group_code, r.min_score, r.min_rank
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use admission_rank_models::AdmissionRecord;

    use super::*;

    fn record(group_code: &str, min_score: u32, min_rank: u32) -> AdmissionRecord {
        AdmissionRecord {
            code: "10001".to_owned(),
            group_code: group_code.to_owned(),
            plan_num: 34,
            admit_num: 35,
            min_score,
            min_rank,
        }
    }

    fn ranked() -> Vec<RankedInstitution> {
        vec![
            RankedInstitution {
                name: "北京大学".to_owned(),
                min_score: 680,
                records: vec![record("206", 689, 99), record("207", 680, 300)],
            },
            RankedInstitution {
                name: "广东海洋大学".to_owned(),
                min_score: 520,
                records: vec![record("201", 520, 120_000)],
            },
        ]
    }

    #[test]
    fn renders_table_with_grouped_names() {
        let md = render_markdown(&ranked(), "标题", "副标题");
        let expected = "# 标题\n\n副标题\n\n\
            | 院校名称 | 专业组代码 | 计划数 | 投档人数 | 投档最低分 | 投档最低排位 |\n\
            |----------|------------|--------|----------|------------|-------------|\n\
            | 北京大学 | 206 | 34 | 35 | 689 | 99 |\n\
            |  | 207 | 34 | 35 | 680 | 300 |\n\
            | 广东海洋大学 | 201 | 34 | 35 | 520 | 120000 |\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn empty_ranking_renders_header_only() {
        let md = render_markdown(&[], "t", "s");
        assert_eq!(md.lines().count(), 6);
        assert!(md.ends_with("|-------------|\n"));
    }

    #[test]
    fn preview_is_limited_to_count() {
        let preview = render_preview(&ranked(), 1);
        assert!(preview.contains("1. 北京大学 (lowest score: 680)"));
        assert!(preview.contains("group 207: 680 points (rank 300)"));
        assert!(!preview.contains("广东海洋大学"));
    }
}
