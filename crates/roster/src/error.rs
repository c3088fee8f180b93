use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Binary attribute column of a roster record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Attendance,
    Discipline,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::Discipline => "discipline",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Required column absent after header normalization.
    #[error("missing required column '{column}' (found: {})", format_found(.found))]
    MissingColumn { column: String, found: Vec<String> },

    /// Attribute value outside {0, 1} or not a number. `row` is 0-based.
    #[error(
        "row {}: {field} value '{value}' for '{name}' is not 0 or 1",
        .row + 1
    )]
    InvalidAttribute {
        row: usize,
        name: String,
        field: Field,
        value: String,
    },
}

fn format_found(found: &[String]) -> String {
    if found.is_empty() {
        "no columns".to_string()
    } else {
        found.join(", ")
    }
}
