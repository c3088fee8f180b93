//! Report assembly: shapes the derived tables into named sheets for an
//! exporter. No computation happens here beyond layout.

use serde::Serialize;

use crate::category::{Attendance, ClassifiedRecord, Discipline};
use crate::matrix::{ClassificationMatrix, CountMatrix, COLS, ROWS};
use crate::schema::NormalizedTable;
use crate::summary::Summary;

pub const DETAILS_SHEET: &str = "Employee Details";
pub const MATRIX_SHEET: &str = "Classification Matrix";
pub const COUNT_SHEET: &str = "Count Matrix";
pub const SUMMARY_SHEET: &str = "Summary";

pub const CLASSIFICATION_COLUMN: &str = "classification";

/// The input table with the `classification` column appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip)]
    attendance_col: usize,
    #[serde(skip)]
    discipline_col: usize,
}

impl DetailsTable {
    pub fn build(norm: &NormalizedTable<'_>, records: &[ClassifiedRecord]) -> Self {
        let width = norm.columns.len();
        let mut columns = norm.columns.clone();
        columns.push(CLASSIFICATION_COLUMN.to_string());

        let extra_indices = norm.extra_indices();

        let rows = records
            .iter()
            .map(|r| {
                let mut row = vec![String::new(); width];
                row[norm.name_idx] = r.record.name.clone();
                // Attribute cells carry their coerced value, so "1.0" reads as "1".
                row[norm.attendance_idx] = r.record.attendance.flag().to_string();
                row[norm.discipline_idx] = r.record.discipline.flag().to_string();
                for (&col, value) in extra_indices.iter().zip(&r.record.extra) {
                    row[col] = value.clone();
                }
                row.push(r.category.label().to_string());
                row
            })
            .collect();

        Self {
            columns,
            rows,
            attendance_col: norm.attendance_idx,
            discipline_col: norm.discipline_idx,
        }
    }

    fn is_flag_column(&self, col: usize) -> bool {
        col == self.attendance_col || col == self.discipline_col
    }
}

/// Everything the export layer needs, computed once per input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBundle {
    pub details: DetailsTable,
    pub matrix: ClassificationMatrix,
    pub counts: CountMatrix,
    pub summary: Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Header row followed by data rows.
    Table,
    /// The 2×2 grid with merged axis headers.
    Grid,
}

/// Inclusive, 0-based cell range to merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Integer(i64),
    /// Raw names; the exporter chooses the join delimiter.
    Names(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// Column header (bold).
    Header,
    /// Grid axis header or axis value (bold, centered).
    Axis,
    /// Plain data cell.
    Body,
    /// Grid body cell (centered, wrapped, bordered).
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCell {
    pub row: u32,
    pub col: u16,
    pub value: CellContent,
    pub role: CellRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSheet {
    pub name: &'static str,
    pub kind: SheetKind,
    pub cells: Vec<ReportCell>,
    pub merges: Vec<MergeRange>,
}

impl ReportSheet {
    fn new(name: &'static str, kind: SheetKind) -> Self {
        Self {
            name,
            kind,
            cells: Vec::new(),
            merges: Vec::new(),
        }
    }

    fn put(&mut self, row: u32, col: u16, value: CellContent, role: CellRole) {
        self.cells.push(ReportCell { row, col, value, role });
    }

    fn text(&mut self, row: u32, col: u16, text: impl Into<String>, role: CellRole) {
        self.put(row, col, CellContent::Text(text.into()), role);
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&ReportCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}

impl ReportBundle {
    /// Sheets in workbook order: details, names grid, counts grid, summary.
    pub fn sheets(&self) -> Vec<ReportSheet> {
        vec![
            self.details_sheet(),
            grid_sheet(MATRIX_SHEET, |d, a| CellContent::Names(self.matrix.get(d, a).clone())),
            grid_sheet(COUNT_SHEET, |d, a| CellContent::Integer(*self.counts.get(d, a) as i64)),
            self.summary_sheet(),
        ]
    }

    fn details_sheet(&self) -> ReportSheet {
        let mut sheet = ReportSheet::new(DETAILS_SHEET, SheetKind::Table);
        for (col, name) in self.details.columns.iter().enumerate() {
            sheet.text(0, col as u16, name.clone(), CellRole::Header);
        }
        for (i, row) in self.details.rows.iter().enumerate() {
            let r = i as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                let content = match value.parse::<i64>() {
                    Ok(n) if self.details.is_flag_column(col) => CellContent::Integer(n),
                    _ => CellContent::Text(value.clone()),
                };
                sheet.put(r, col as u16, content, CellRole::Body);
            }
        }
        sheet
    }

    fn summary_sheet(&self) -> ReportSheet {
        let mut sheet = ReportSheet::new(SUMMARY_SHEET, SheetKind::Table);
        sheet.text(0, 0, "Category", CellRole::Header);
        sheet.text(0, 1, "Count", CellRole::Header);
        for (i, (label, count)) in self.summary.rows().into_iter().enumerate() {
            let r = i as u32 + 1;
            sheet.text(r, 0, label, CellRole::Body);
            sheet.put(r, 1, CellContent::Integer(count as i64), CellRole::Body);
        }
        sheet
    }
}

/// Lay out a 2×2 grid:
///
/// ```text
///        A            B        C
/// 1  Discipline   Attendance (merged B1:C1)
/// 2  (merged A1:A2)   0        1
/// 3      1        d=1,a=0  d=1,a=1
/// 4      0        d=0,a=0  d=0,a=1
/// ```
fn grid_sheet(
    name: &'static str,
    value: impl Fn(Discipline, Attendance) -> CellContent,
) -> ReportSheet {
    let mut sheet = ReportSheet::new(name, SheetKind::Grid);

    sheet.text(0, 0, "Discipline", CellRole::Axis);
    sheet.merges.push(MergeRange { first_row: 0, first_col: 0, last_row: 1, last_col: 0 });
    sheet.text(0, 1, "Attendance", CellRole::Axis);
    sheet.merges.push(MergeRange { first_row: 0, first_col: 1, last_row: 0, last_col: 2 });

    for (c, a) in COLS.into_iter().enumerate() {
        sheet.text(1, c as u16 + 1, a.flag().to_string(), CellRole::Axis);
    }
    for (r, d) in ROWS.into_iter().enumerate() {
        let row = r as u32 + 2;
        sheet.text(row, 0, d.flag().to_string(), CellRole::Axis);
        for (c, a) in COLS.into_iter().enumerate() {
            sheet.put(row, c as u16 + 1, value(d, a), CellRole::Grid);
        }
    }
    sheet
}
