// File I/O operations

pub mod csv;
pub mod error;
pub mod json;
pub mod xlsx;

use std::path::Path;

use rollbook_roster::Table;

pub use error::IoError;

/// Input options shared by all readers.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Worksheet to read (Excel inputs). Defaults to the first sheet.
    pub sheet: Option<String>,
    /// Field delimiter (CSV inputs). Sniffed when absent.
    pub delimiter: Option<u8>,
}

/// Read a roster table, choosing the reader by file extension.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table, IoError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "txt" => csv::import(path, options.delimiter),
        "tsv" | "tab" => csv::import(path, Some(options.delimiter.unwrap_or(b'\t'))),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::import(path, options.sheet.as_deref()),
        _ => Err(IoError::UnsupportedFormat(ext)),
    }
}

/// True when every cell is blank.
pub(crate) fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|c| c.as_ref().trim().is_empty())
}

/// Split rows into header + data: the first non-blank row is the header,
/// later blank rows are dropped.
pub(crate) fn table_from_rows(rows: impl IntoIterator<Item = Vec<String>>) -> Result<Table, IoError> {
    let mut rows = rows.into_iter().skip_while(|r| is_blank_row(r));
    let header = rows.next().ok_or(IoError::EmptyTable)?;

    let mut table = Table::new(header);
    let mut skipped = 0usize;
    for row in rows {
        if is_blank_row(&row) {
            skipped += 1;
            continue;
        }
        table.push_row(row);
    }
    if skipped > 0 {
        log::debug!("skipped {skipped} blank row(s)");
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_blank_row_is_header() {
        let rows = vec![
            vec!["".to_string(), " ".to_string()],
            vec!["Name".to_string(), "Attendance".to_string()],
            vec!["Ada".to_string(), "1".to_string()],
            vec!["".to_string(), "".to_string()],
            vec!["Bo".to_string(), "0".to_string()],
        ];
        let table = table_from_rows(rows).unwrap();
        assert_eq!(table.columns, vec!["Name", "Attendance"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), "Bo");
    }

    #[test]
    fn all_blank_input_has_no_header() {
        let err = table_from_rows(vec![vec![String::new()]]).unwrap_err();
        assert!(matches!(err, IoError::EmptyTable));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_table(Path::new("roster.pdf"), &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref e) if e == "pdf"));
    }
}
