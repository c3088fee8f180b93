use std::fmt;

use serde::Serialize;

use crate::coerce::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attendance {
    Low,
    Good,
}

impl Attendance {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Self::Good
        } else {
            Self::Low
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Good => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    Poor,
    Good,
}

impl Discipline {
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Self::Good
        } else {
            Self::Poor
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            Self::Poor => 0,
            Self::Good => 1,
        }
    }
}

/// One of the four mutually exclusive roster categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Low Attendance, Good Discipline")]
    LowAttendanceGoodDiscipline,
    #[serde(rename = "Good Attendance, Good Discipline")]
    GoodAttendanceGoodDiscipline,
    #[serde(rename = "Low Attendance, Poor Discipline")]
    LowAttendancePoorDiscipline,
    #[serde(rename = "Good Attendance, Poor Discipline")]
    GoodAttendancePoorDiscipline,
}

impl Category {
    pub fn all() -> [Category; 4] {
        [
            Self::LowAttendanceGoodDiscipline,
            Self::GoodAttendanceGoodDiscipline,
            Self::LowAttendancePoorDiscipline,
            Self::GoodAttendancePoorDiscipline,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LowAttendanceGoodDiscipline => "Low Attendance, Good Discipline",
            Self::GoodAttendanceGoodDiscipline => "Good Attendance, Good Discipline",
            Self::LowAttendancePoorDiscipline => "Low Attendance, Poor Discipline",
            Self::GoodAttendancePoorDiscipline => "Good Attendance, Poor Discipline",
        }
    }

    pub fn attendance(&self) -> Attendance {
        match self {
            Self::LowAttendanceGoodDiscipline | Self::LowAttendancePoorDiscipline => Attendance::Low,
            Self::GoodAttendanceGoodDiscipline | Self::GoodAttendancePoorDiscipline => Attendance::Good,
        }
    }

    pub fn discipline(&self) -> Discipline {
        match self {
            Self::LowAttendanceGoodDiscipline | Self::GoodAttendanceGoodDiscipline => Discipline::Good,
            Self::LowAttendancePoorDiscipline | Self::GoodAttendancePoorDiscipline => Discipline::Poor,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(attendance: Attendance, discipline: Discipline) -> Category {
    match (attendance, discipline) {
        (Attendance::Low, Discipline::Good) => Category::LowAttendanceGoodDiscipline,
        (Attendance::Good, Discipline::Good) => Category::GoodAttendanceGoodDiscipline,
        (Attendance::Low, Discipline::Poor) => Category::LowAttendancePoorDiscipline,
        (Attendance::Good, Discipline::Poor) => Category::GoodAttendancePoorDiscipline,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub record: Record,
    pub category: Category,
}

pub fn classify_records(records: Vec<Record>) -> Vec<ClassifiedRecord> {
    records
        .into_iter()
        .map(|record| {
            let category = classify(record.attendance, record.discipline);
            ClassifiedRecord { record, category }
        })
        .collect()
}
