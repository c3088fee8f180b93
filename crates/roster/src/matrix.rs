//! The 2×2 attendance/discipline grid.
//!
//! Rows are discipline (Good = 1 first, then Poor = 0); columns are
//! attendance (Low = 0 first, then Good = 1). The layout is fixed.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::category::{Attendance, ClassifiedRecord, Discipline};

pub const ROWS: [Discipline; 2] = [Discipline::Good, Discipline::Poor];
pub const COLS: [Attendance; 2] = [Attendance::Low, Attendance::Good];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix<T> {
    cells: [[T; 2]; 2],
}

pub type ClassificationMatrix = Matrix<Vec<String>>;
pub type CountMatrix = Matrix<usize>;

fn row_index(d: Discipline) -> usize {
    match d {
        Discipline::Good => 0,
        Discipline::Poor => 1,
    }
}

fn col_index(a: Attendance) -> usize {
    match a {
        Attendance::Low => 0,
        Attendance::Good => 1,
    }
}

impl<T> Matrix<T> {
    pub fn get(&self, discipline: Discipline, attendance: Attendance) -> &T {
        &self.cells[row_index(discipline)][col_index(attendance)]
    }

    pub fn get_mut(&mut self, discipline: Discipline, attendance: Attendance) -> &mut T {
        &mut self.cells[row_index(discipline)][col_index(attendance)]
    }

    /// Cells in display order: row by row, left to right.
    pub fn cells(&self) -> impl Iterator<Item = (Discipline, Attendance, &T)> + '_ {
        ROWS.into_iter()
            .flat_map(|d| COLS.into_iter().map(move |a| (d, a)))
            .map(move |(d, a)| (d, a, self.get(d, a)))
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        let [[a, b], [c, d]] = &self.cells;
        Matrix {
            cells: [[f(a), f(b)], [f(c), f(d)]],
        }
    }
}

impl CountMatrix {
    pub fn total(&self) -> usize {
        self.cells().map(|(_, _, n)| *n).sum()
    }
}

/// Bucket names by cell, keeping input order within each cell.
pub fn build_matrix(records: &[ClassifiedRecord]) -> ClassificationMatrix {
    let mut matrix = ClassificationMatrix::default();
    for r in records {
        matrix
            .get_mut(r.record.discipline, r.record.attendance)
            .push(r.record.name.clone());
    }
    matrix
}

pub fn count_matrix(matrix: &ClassificationMatrix) -> CountMatrix {
    matrix.map(Vec::len)
}

#[derive(Serialize)]
struct CellRef<'a, T> {
    discipline: u8,
    attendance: u8,
    value: &'a T,
}

impl<T: Serialize> Serialize for Matrix<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(4))?;
        for (d, a, value) in self.cells() {
            seq.serialize_element(&CellRef {
                discipline: d.flag(),
                attendance: a.flag(),
                value,
            })?;
        }
        seq.end()
    }
}
