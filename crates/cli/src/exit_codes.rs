//! CLI Exit Code Registry
//!
//! Single source of truth for `rollbook` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad arguments)                      |
//! | 3    | I/O error (cannot read input or write output)    |
//! | 4    | Schema error (required column missing)           |
//! | 5    | Invalid attribute (value not 0 or 1)             |
//! | 6    | Config error (settings file unreadable/invalid)  |

use rollbook_io::IoError;
use rollbook_roster::ClassifyError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be read or output could not be written.
pub const EXIT_IO: u8 = 3;

/// A required column (name, attendance, discipline) is missing.
pub const EXIT_SCHEMA: u8 = 4;

/// An attendance or discipline value is not 0 or 1.
pub const EXIT_INVALID_ATTRIBUTE: u8 = 5;

/// Settings or --config file is unreadable or invalid.
pub const EXIT_CONFIG: u8 = 6;

pub fn classify_exit_code(err: &ClassifyError) -> u8 {
    match err {
        ClassifyError::MissingColumn { .. } => EXIT_SCHEMA,
        ClassifyError::InvalidAttribute { .. } => EXIT_INVALID_ATTRIBUTE,
    }
}

pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::UnsupportedFormat(_) | IoError::SheetNotFound { .. } => EXIT_USAGE,
        IoError::EmptyTable => EXIT_SCHEMA,
        IoError::Open { .. } | IoError::Read { .. } | IoError::NoSheets | IoError::Write { .. } => EXIT_IO,
    }
}
