use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot open {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("cannot read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("unsupported input format '{0}' (expected csv, tsv, txt, xlsx, xlsm, xls, xlsb or ods)")]
    UnsupportedFormat(String),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("sheet '{name}' not found (available: {})", .available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    #[error("input has no header row")]
    EmptyTable,

    #[error("cannot write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}
