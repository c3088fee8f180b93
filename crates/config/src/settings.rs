// Application settings
// Loaded from ~/.config/rollbook/settings.json, or an explicit TOML file via --config

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("cannot write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },
}

/// How roster files are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    /// Worksheet to read from Excel inputs (None = first sheet)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,

    /// CSV field delimiter (None = sniff)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

/// How the report workbook is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Joins names inside one matrix cell
    pub name_delimiter: String,

    /// Width (characters) of the value columns on the matrix sheets
    pub matrix_column_width: f64,

    /// Thin borders around the matrix grid
    pub borders: bool,

    /// Default output file for `rollbook classify`
    pub output_file: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            name_delimiter: "\n".to_string(),
            matrix_column_width: 30.0,
            borders: true,
            output_file: "Employee_classification_output.xlsx".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input: InputSettings,
    pub export: ExportSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rollbook");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::from_json_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Parse a settings.json file. Lines starting with `//` are comments.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = read(path)?;
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let settings: Settings =
            serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&read(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let width = self.export.matrix_column_width;
        if !(1.0..=255.0).contains(&width) {
            return Err(ConfigError::Validation(format!(
                "export.matrix_column_width must be between 1 and 255, got {width}"
            )));
        }

        if self.export.output_file.trim().is_empty() {
            return Err(ConfigError::Validation("export.output_file must not be empty".into()));
        }

        if let Some(d) = self.input.delimiter {
            if delimiter_byte(d).is_none() {
                return Err(ConfigError::Validation(format!("input.{}, got {d:?}", DELIMITER_RULE)));
            }
        }

        Ok(())
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |message: String| ConfigError::Write {
            path: path.to_path_buf(),
            message,
        };

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        fs::write(path, json).map_err(|e| write_err(e.to_string()))
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

pub const DELIMITER_RULE: &str = "delimiter must be a single ASCII character other than a quote or newline";

/// A usable field delimiter as a byte, or `None` if it breaks CSV parsing.
pub fn delimiter_byte(d: char) -> Option<u8> {
    (d.is_ascii() && !matches!(d, '"' | '\n' | '\r')).then_some(d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_report_conventions() {
        let s = Settings::default();
        assert_eq!(s.export.name_delimiter, "\n");
        assert_eq!(s.export.output_file, "Employee_classification_output.xlsx");
        assert!(s.export.borders);
        assert!(s.input.sheet.is_none());
    }

    #[test]
    fn parse_partial_toml() {
        let s = Settings::from_toml(
            r#"
[input]
sheet = "Staff"
delimiter = ";"

[export]
name_delimiter = ", "
"#,
        )
        .unwrap();
        assert_eq!(s.input.sheet.as_deref(), Some("Staff"));
        assert_eq!(s.input.delimiter, Some(';'));
        assert_eq!(s.export.name_delimiter, ", ");
        assert_eq!(s.export.matrix_column_width, 30.0);
    }

    #[test]
    fn reject_unknown_key() {
        let err = Settings::from_toml("[export]\nname_delimter = \",\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reject_bad_column_width() {
        let err = Settings::from_toml("[export]\nmatrix_column_width = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("matrix_column_width"));
    }

    #[test]
    fn reject_multibyte_delimiter() {
        let err = Settings::from_toml("[input]\ndelimiter = \"§\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn reject_quote_delimiter() {
        let err = Settings::from_toml("[input]\ndelimiter = '\"'\n").unwrap_err();
        assert!(err.to_string().contains("other than a quote"));
        assert_eq!(delimiter_byte('"'), None);
        assert_eq!(delimiter_byte('\n'), None);
        assert_eq!(delimiter_byte(';'), Some(b';'));
    }

    #[test]
    fn json_with_comments_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut s = Settings::default();
        s.export.borders = false;
        s.save_to(&path).unwrap();

        let mut contents = fs::read_to_string(&path).unwrap();
        contents.insert_str(0, "// rollbook settings\n");
        fs::write(&path, contents).unwrap();

        assert_eq!(Settings::from_json_file(&path).unwrap(), s);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Settings::from_toml_file(Path::new("/nonexistent/rollbook.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
