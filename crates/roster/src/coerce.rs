//! Attribute coercion: text cells to strongly typed records.
//!
//! Coercion is strict. A value is accepted only when it reads as a number
//! exactly equal to 0 or 1 (`1`, `1.0`, `+0`). Blank cells, words, values
//! outside the domain and fractional values (`1.9`) are rejected rather than
//! truncated, and the first rejection aborts the whole table.

use crate::category::{Attendance, Discipline};
use crate::error::{ClassifyError, Field};
use crate::schema::NormalizedTable;

/// A validated roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 0-based data row index in the input table.
    pub row: usize,
    pub name: String,
    pub attendance: Attendance,
    pub discipline: Discipline,
    /// Passthrough cells, in `NormalizedTable::extra_indices` order.
    pub extra: Vec<String>,
}

/// Parse a binary flag. `None` when the value is not exactly 0 or 1.
pub fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    match value {
        "0" => return Some(false),
        "1" => return Some(true),
        "" => return None,
        _ => {}
    }
    // Reject things f64 parsing would otherwise accept.
    if !value.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E')) {
        return None;
    }
    let n: f64 = value.parse().ok()?;
    if n == 0.0 {
        Some(false)
    } else if n == 1.0 {
        Some(true)
    } else {
        None
    }
}

/// Coerce every row of a normalized table. Fails on the first bad value.
pub fn coerce(norm: &NormalizedTable<'_>) -> Result<Vec<Record>, ClassifyError> {
    let table = norm.table;
    let extra_indices = norm.extra_indices();
    let mut records = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        let name = table.cell(row, norm.name_idx).to_string();

        let flag = |field: Field, col: usize| -> Result<bool, ClassifyError> {
            let raw = table.cell(row, col);
            parse_flag(raw).ok_or_else(|| ClassifyError::InvalidAttribute {
                row,
                name: name.clone(),
                field,
                value: raw.to_string(),
            })
        };

        let attendance = Attendance::from_flag(flag(Field::Attendance, norm.attendance_idx)?);
        let discipline = Discipline::from_flag(flag(Field::Discipline, norm.discipline_idx)?);

        let extra = extra_indices
            .iter()
            .map(|&i| table.cell(row, i).to_string())
            .collect();

        records.push(Record {
            row,
            name,
            attendance,
            discipline,
            extra,
        });
    }

    Ok(records)
}
