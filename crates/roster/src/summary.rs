use serde::Serialize;

use crate::category::{Attendance, ClassifiedRecord, Discipline};

/// Aggregate counts over the whole roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub good_attendance: usize,
    pub low_attendance: usize,
    pub good_discipline: usize,
    pub poor_discipline: usize,
    pub both_good: usize,
    pub both_poor: usize,
}

impl Summary {
    /// Labelled rows, in report order.
    pub fn rows(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Total", self.total),
            ("Good Attendance", self.good_attendance),
            ("Low Attendance", self.low_attendance),
            ("Good Discipline", self.good_discipline),
            ("Poor Discipline", self.poor_discipline),
            ("Both Good (1,1)", self.both_good),
            ("Both Poor (0,0)", self.both_poor),
        ]
    }
}

pub fn compute_summary(records: &[ClassifiedRecord]) -> Summary {
    let mut s = Summary {
        total: records.len(),
        ..Summary::default()
    };

    for r in records {
        let (a, d) = (r.record.attendance, r.record.discipline);
        match a {
            Attendance::Good => s.good_attendance += 1,
            Attendance::Low => s.low_attendance += 1,
        }
        match d {
            Discipline::Good => s.good_discipline += 1,
            Discipline::Poor => s.poor_discipline += 1,
        }
        match (a, d) {
            (Attendance::Good, Discipline::Good) => s.both_good += 1,
            (Attendance::Low, Discipline::Poor) => s.both_poor += 1,
            _ => {}
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::classify_records;
    use crate::coerce::Record;

    fn records(pairs: &[(u8, u8)]) -> Vec<ClassifiedRecord> {
        let raw = pairs
            .iter()
            .enumerate()
            .map(|(row, &(a, d))| Record {
                row,
                name: format!("p{row}"),
                attendance: Attendance::from_flag(a == 1),
                discipline: Discipline::from_flag(d == 1),
                extra: Vec::new(),
            })
            .collect();
        classify_records(raw)
    }

    #[test]
    fn summary_counts() {
        let s = compute_summary(&records(&[(1, 1), (0, 0), (1, 0), (0, 1), (1, 1)]));
        assert_eq!(s.total, 5);
        assert_eq!(s.good_attendance, 3);
        assert_eq!(s.low_attendance, 2);
        assert_eq!(s.good_discipline, 3);
        assert_eq!(s.poor_discipline, 2);
        assert_eq!(s.both_good, 2);
        assert_eq!(s.both_poor, 1);
    }

    #[test]
    fn rows_keep_report_order() {
        let labels: Vec<&str> = Summary::default().rows().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Total",
                "Good Attendance",
                "Low Attendance",
                "Good Discipline",
                "Poor Discipline",
                "Both Good (1,1)",
                "Both Poor (0,0)",
            ]
        );
    }
}
