//! Header normalization and required-column resolution.

use log::warn;

use crate::error::ClassifyError;
use crate::table::Table;

pub const NAME: &str = "name";
pub const ATTENDANCE: &str = "attendance";
pub const DISCIPLINE: &str = "discipline";

/// Required columns, in the order they are checked.
pub const REQUIRED: [&str; 3] = [NAME, ATTENDANCE, DISCIPLINE];

/// A view of the input table with normalized headers and resolved
/// positions of the three required columns.
#[derive(Debug, Clone)]
pub struct NormalizedTable<'a> {
    pub table: &'a Table,
    /// Every input column, normalized, in original order.
    pub columns: Vec<String>,
    pub name_idx: usize,
    pub attendance_idx: usize,
    pub discipline_idx: usize,
}

impl NormalizedTable<'_> {
    /// Indexes of the passthrough columns (anything not required).
    pub fn extra_indices(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&i| i != self.name_idx && i != self.attendance_idx && i != self.discipline_idx)
            .collect()
    }
}

pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Normalize headers and locate `name`, `attendance`, `discipline`.
pub fn normalize(table: &Table) -> Result<NormalizedTable<'_>, ClassifyError> {
    let columns: Vec<String> = table.columns.iter().map(|h| normalize_header(h)).collect();

    let idx = |wanted: &str| -> Result<usize, ClassifyError> {
        let mut hits = columns.iter().enumerate().filter(|(_, c)| c.as_str() == wanted);
        let (first, _) = hits.next().ok_or_else(|| ClassifyError::MissingColumn {
            column: wanted.to_string(),
            found: columns.clone(),
        })?;
        let dupes = hits.count();
        if dupes > 0 {
            warn!("column '{wanted}' appears {} times; using the first", dupes + 1);
        }
        Ok(first)
    };

    let name_idx = idx(NAME)?;
    let attendance_idx = idx(ATTENDANCE)?;
    let discipline_idx = idx(DISCIPLINE)?;

    Ok(NormalizedTable {
        table,
        columns,
        name_idx,
        attendance_idx,
        discipline_idx,
    })
}
