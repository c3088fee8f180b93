// JSON export of the report bundle

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use rollbook_roster::ReportBundle;

use crate::IoError;

pub fn to_string(bundle: &ReportBundle) -> Result<String, String> {
    serde_json::to_string_pretty(bundle).map_err(|e| format!("JSON serialization error: {e}"))
}

pub fn export(bundle: &ReportBundle, path: &Path) -> Result<(), IoError> {
    let write_err = |message: String| IoError::Write {
        path: path.to_path_buf(),
        message,
    };
    let file = File::create(path).map_err(|e| write_err(e.to_string()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, bundle).map_err(|e| write_err(e.to_string()))
}
