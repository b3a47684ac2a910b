//! Table recovery from extracted page text.
//!
//! `pdf_extract` only produces text, so tabular regions are recovered from
//! the text layout: a table is a run of consecutive lines that each split
//! into at least [`MIN_TABLE_COLUMNS`] whitespace-separated cells.

/// Minimum number of cells a line needs to count as a table row.
pub const MIN_TABLE_COLUMNS: usize = 3;

/// Minimum number of consecutive rows that form a table.
const MIN_TABLE_ROWS: usize = 2;

/// A single table row. `None` marks a cell missing from this row.
pub type Row = Vec<Option<String>>;

/// A table recovered from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Rows in page order, all padded to the same width.
    pub rows: Vec<Row>,
}

impl Table {
    /// Number of columns (the width of the widest source row).
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Splits a line into cells if it looks like a table row.
fn split_row(line: &str) -> Option<Vec<String>> {
    let cells: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
    (cells.len() >= MIN_TABLE_COLUMNS).then_some(cells)
}

/// Pads every row to the widest row's length and wraps it as a [`Table`].
fn finish_table(rows: Vec<Vec<String>>) -> Table {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let rows = rows
        .into_iter()
        .map(|cells| {
            let mut row: Row = cells.into_iter().map(Some).collect();
            row.resize(width, None);
            row
        })
        .collect();

    Table { rows }
}

/// Detects tables in the text of a single page.
#[must_use]
pub fn detect(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        if let Some(cells) = split_row(line) {
            current.push(cells);
            continue;
        }

        if current.len() >= MIN_TABLE_ROWS {
            tables.push(finish_table(std::mem::take(&mut current)));
        } else {
            current.clear();
        }
    }

    if current.len() >= MIN_TABLE_ROWS {
        tables.push(finish_table(current));
    }

    log::trace!("Detected {} table(s) in page text", tables.len());

    tables
}

/// Renders a row as cells joined by `" | "`, with missing cells empty.
#[must_use]
pub fn format_row(row: &[Option<String>]) -> String {
    row.iter()
        .map(|cell| cell.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_consecutive_multi_column_lines() {
        let text = "广东省2025年本科普通类\n\
                    院校代码 院校名称 专业组代码 计划数\n\
                    10001 北京大学 206 34 35 689 99\n\
                    10003 清华大学 201 20 20 690 80\n\
                    第 1 页";
        let tables = detect(text);

        assert_eq!(tables.len(), 1);
        // "第 1 页" has three cells, so it joins the data run.
        assert_eq!(tables[0].rows.len(), 4);
        assert_eq!(tables[0].width(), 7);
        assert_eq!(tables[0].rows[0][0].as_deref(), Some("院校代码"));
        assert_eq!(tables[0].rows[0][4], None);
        assert_eq!(tables[0].rows[1][1].as_deref(), Some("北京大学"));
    }

    #[test]
    fn pads_short_rows_with_missing_cells() {
        let text = "a b c d\ne f g";
        let tables = detect(text);

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[1].len(), 4);
        assert_eq!(tables[0].rows[1][3], None);
        assert_eq!(format_row(&tables[0].rows[1]), "e | f | g | ");
    }

    #[test]
    fn single_row_is_not_a_table() {
        assert!(detect("title\na b c\nfooter").is_empty());
    }

    #[test]
    fn empty_text_has_no_tables() {
        assert!(detect("").is_empty());
    }

    #[test]
    fn separates_tables_on_short_lines() {
        let text = "a b c\nd e f\n\ng h i\nj k l\nm n o";
        let tables = detect(text);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[1].rows.len(), 3);
    }
}
