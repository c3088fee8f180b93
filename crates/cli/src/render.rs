//! Plain-text rendering of tables for the terminal.

use std::fmt::Write;

use rollbook_roster::matrix::{COLS, ROWS};
use rollbook_roster::{CountMatrix, Summary};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a preview column may get before values are truncated.
const MAX_COL_WIDTH: usize = 24;

/// Pad or truncate to exactly `width` display columns. Truncation ends in "..".
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw <= width {
        return format!("{}{}", s, " ".repeat(width - sw));
    }

    let budget = width.saturating_sub(2);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    let dots = ".".repeat(width.min(2));
    format!("{out}{dots}{}", " ".repeat(budget - used))
}

fn pad_left(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(sw)), s)
}

pub(crate) fn format_summary(summary: &Summary) -> String {
    let rows = summary.rows();
    let label_width = rows
        .iter()
        .map(|(l, _)| l.len())
        .chain(std::iter::once("Category".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", pad_right("Category", label_width), "Count");
    for (label, count) in rows {
        let _ = writeln!(out, "{}  {}", pad_right(label, label_width), pad_left(&count.to_string(), 5));
    }
    out
}

pub(crate) fn format_counts(counts: &CountMatrix) -> String {
    let cell_width = counts
        .cells()
        .map(|(_, _, n)| n.to_string().len())
        .max()
        .unwrap_or(1)
        .max(3);
    let axis = "Discipline";

    let mut out = String::new();
    let _ = writeln!(out, "{}  Attendance", " ".repeat(axis.len()));
    let mut header = axis.to_string();
    for a in COLS {
        let _ = write!(header, "  {}", pad_left(&a.flag().to_string(), cell_width));
    }
    let _ = writeln!(out, "{header}");
    for d in ROWS {
        let mut line = pad_left(&d.flag().to_string(), axis.len());
        for a in COLS {
            let _ = write!(line, "  {}", pad_left(&counts.get(d, a).to_string(), cell_width));
        }
        let _ = writeln!(out, "{line}");
    }
    out
}

/// Render the first `limit` rows of a table with aligned columns.
pub(crate) fn format_table(columns: &[String], rows: &[Vec<String>], limit: usize) -> String {
    let shown = &rows[..rows.len().min(limit)];
    let widths: Vec<usize> = (0..columns.len())
        .map(|c| {
            shown
                .iter()
                .map(|r| r.get(c).map(|v| UnicodeWidthStr::width(v.as_str())).unwrap_or(0))
                .chain(std::iter::once(UnicodeWidthStr::width(columns[c].as_str())))
                .max()
                .unwrap_or(0)
                .clamp(1, MAX_COL_WIDTH)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", render_row(&widths, columns.iter().map(String::as_str)));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-")
    );
    for row in shown {
        let _ = writeln!(out, "{}", render_row(&widths, row.iter().map(String::as_str)));
    }
    if rows.len() > shown.len() {
        let _ = writeln!(out, "... {} more row(s)", rows.len() - shown.len());
    }
    out
}

fn render_row<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    widths
        .iter()
        .map(|&w| pad_right(cells.next().unwrap_or(""), w))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollbook_roster::{run, Table};

    #[test]
    fn pad_and_truncate() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("abcde", 5), "abcde");
        assert_eq!(pad_right("abcdef", 5), "abc..");
        // "世界你好" is 8 display columns
        let t = pad_right("\u{4e16}\u{754c}\u{4f60}\u{597d}", 7);
        assert_eq!(t, "\u{4e16}\u{754c}.. ");
        assert_eq!(UnicodeWidthStr::width(t.as_str()), 7);
    }

    fn bundle() -> rollbook_roster::ReportBundle {
        let mut table = Table::new(["name", "attendance", "discipline"]);
        table.push_row(["A", "1", "1"]);
        table.push_row(["B", "0", "0"]);
        table.push_row(["C", "1", "1"]);
        run(&table).unwrap()
    }

    #[test]
    fn summary_lists_seven_rows() {
        let text = format_summary(&bundle().summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("Category"));
        assert!(lines[1].starts_with("Total") && lines[1].ends_with('3'));
        assert!(lines[7].starts_with("Both Poor (0,0)") && lines[7].ends_with('1'));
    }

    #[test]
    fn counts_follow_grid_layout() {
        let text = format_counts(&bundle().counts);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), vec!["Discipline", "0", "1"]);
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["1", "0", "2"]);
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), vec!["0", "1", "0"]);
    }

    #[test]
    fn table_preview_limits_rows() {
        let columns = vec!["name".to_string(), "attendance".to_string()];
        let rows: Vec<Vec<String>> = (0..5).map(|i| vec![format!("p{i}"), "1".to_string()]).collect();
        let text = format_table(&columns, &rows, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "name | attendance");
        assert_eq!(lines[2], "p0   | 1");
        assert_eq!(lines[4], "... 3 more row(s)");
    }
}
