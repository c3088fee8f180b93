// Configuration loading

pub mod settings;

pub use settings::{delimiter_byte, ConfigError, ExportSettings, InputSettings, Settings, DELIMITER_RULE};
