//! Fixed-width layout primitives shared by every report.
//!
//! Column widths are constants so output width never depends on content.
//! Cells longer than their column are written in full and push the rest of
//! the row right; nothing is truncated or wrapped.

/// Width of the `=` rule under every banner.
pub const BANNER_WIDTH: usize = 80;
/// Width of the rule that frames a routine.
pub const ROUTINE_RULE_WIDTH: usize = 60;
/// Width of the rule that closes a rung or code block.
pub const BLOCK_RULE_WIDTH: usize = 40;
/// Dash count under the free-width last column.
const FREE_COLUMN_RULE: usize = 20;

/// A table column. The last column of a table is free-width.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

impl Column {
    pub const fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

/// Tag tables everywhere: Name, Usage, Type/Alias, Description.
pub const TAG_COLUMNS: &[Column] = &[
    Column::new("Name", 30),
    Column::new("Usage", 10),
    Column::new("Type/Alias", 30),
    Column::new("Description", 0),
];

pub const MEMBER_COLUMNS: &[Column] = &[
    Column::new("Member", 25),
    Column::new("DataType", 26),
    Column::new("Description", 0),
];

/// The name header is shifted one space to sit over the name, after the
/// required-parameter marker.
pub const PARAMETER_COLUMNS: &[Column] = &[
    Column::new(" Name", 25),
    Column::new("Usage", 8),
    Column::new("DataType", 20),
    Column::new("Description", 0),
];

pub const MODULE_COLUMNS: &[Column] = &[
    Column::new("Name", 25),
    Column::new("Catalog Number", 20),
    Column::new("Parent", 20),
    Column::new("Description", 0),
];

/// A table bound to a column set and an indent.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    pub columns: &'a [Column],
    pub indent: &'a str,
}

impl<'a> Table<'a> {
    pub fn new(columns: &'a [Column], indent: &'a str) -> Self {
        Self { columns, indent }
    }

    /// Header line followed by the dash rule.
    pub fn header(&self, lines: &mut Vec<String>) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        lines.push(self.row(&headers));
        let rules: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let width = if i + 1 == self.columns.len() {
                    FREE_COLUMN_RULE
                } else {
                    c.width
                };
                "-".repeat(width)
            })
            .collect();
        let rules: Vec<&str> = rules.iter().map(String::as_str).collect();
        lines.push(self.row(&rules));
    }

    /// One row, left-aligned and padded to the column widths.
    pub fn row(&self, cells: &[&str]) -> String {
        let last = self.columns.len().saturating_sub(1);
        let line = cells
            .iter()
            .zip(self.columns)
            .enumerate()
            .map(|(i, (cell, column))| {
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = column.width)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        format!("{}{}", self.indent, line).trim_end().to_string()
    }
}

/// Title line plus the `=` rule.
pub fn banner(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("=".repeat(BANNER_WIDTH));
}

/// Collapse runs of whitespace (line breaks included) to single spaces.
pub fn table_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `label: text`, with continuation lines aligned under the first line of
/// text. The text is kept verbatim apart from that alignment.
pub fn labeled(lines: &mut Vec<String>, indent: &str, label: &str, text: &str) {
    let mut parts = text.split('\n');
    let first = parts.next().unwrap_or("");
    lines.push(format!("{indent}{label}: {first}").trim_end().to_string());
    let pad = " ".repeat(label.len() + 2);
    for part in parts {
        if part.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{indent}{pad}{}", part.trim_end()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_table_header() {
        let mut lines = Vec::new();
        Table::new(TAG_COLUMNS, "").header(&mut lines);
        assert_eq!(
            lines[0],
            "Name                           | Usage      | Type/Alias                     | Description"
        );
        assert_eq!(
            lines[1],
            format!("{} | {} | {} | {}", "-".repeat(30), "-".repeat(10), "-".repeat(30), "-".repeat(20))
        );
    }

    #[test]
    fn row_pads_fixed_columns() {
        let table = Table::new(TAG_COLUMNS, "  ");
        let row = table.row(&["Pump", "Output", "BOOL", "Pump run"]);
        assert_eq!(row, format!("  {:<30} | {:<10} | {:<30} | Pump run", "Pump", "Output", "BOOL"));
    }

    #[test]
    fn long_cells_are_not_truncated() {
        let table = Table::new(TAG_COLUMNS, "");
        let long = "A".repeat(45);
        let row = table.row(&[&long, "Local", "DINT", ""]);
        assert!(row.starts_with(&format!("{long} | Local      | DINT")));
        assert!(!row.ends_with(' '));
    }

    #[test]
    fn column_positions_independent_of_content() {
        let table = Table::new(TAG_COLUMNS, "");
        let a = table.row(&["x", "Input", "BOOL", "d"]);
        let b = table.row(&["much_longer_name", "Unknown", "MyUDT[10]", "d"]);
        assert_eq!(a.find("| d"), b.find("| d"));
    }

    #[test]
    fn table_text_collapses_whitespace() {
        assert_eq!(table_text("  Line one\n   line  two "), "Line one line two");
    }

    #[test]
    fn labeled_aligns_continuation_lines() {
        let mut lines = Vec::new();
        labeled(&mut lines, "  ", "Desc", "First\nSecond\n\nFourth");
        assert_eq!(lines, vec!["  Desc: First", "        Second", "", "        Fourth"]);
    }

    #[test]
    fn banner_is_fixed_width() {
        let mut lines = Vec::new();
        banner(&mut lines, "TASKS - Found 0");
        assert_eq!(lines[1].len(), BANNER_WIDTH);
    }
}
