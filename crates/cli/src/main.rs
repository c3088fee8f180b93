// rollbook CLI - roster classification reports
// Reads a roster (CSV or Excel), classifies by attendance/discipline,
// writes the multi-sheet report workbook.

mod exit_codes;
mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};

use rollbook_config::{delimiter_byte, ConfigError, Settings, DELIMITER_RULE};
use rollbook_io::xlsx::ExportStyle;
use rollbook_io::{IoError, ReadOptions};
use rollbook_roster::schema::normalize_header;
use rollbook_roster::{ClassifyError, ReportBundle, Table};

use exit_codes::{
    classify_exit_code, io_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "rollbook")]
#[command(about = "Classify a roster by attendance and discipline into a 2x2 report")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Input file plus the options that control how it is read.
#[derive(Args)]
struct InputArgs {
    /// Roster file (.csv, .tsv, .txt, .xlsx, .xlsm, .xls, .xlsb, .ods)
    input: PathBuf,

    /// Worksheet to read from Excel inputs (default: first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// CSV field delimiter (default: sniffed)
    #[arg(long)]
    delimiter: Option<char>,

    /// Settings file (TOML) instead of the user settings.json
    #[arg(long, env = "ROLLBOOK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a roster and write the report workbook
    #[command(after_help = "\
Input needs columns Name, Attendance and Discipline (any case, surrounding
spaces ignored). Attendance and discipline must be 0 or 1.

Output sheets: Employee Details, Classification Matrix, Count Matrix, Summary.
An output path ending in .json writes the report as JSON instead.

Examples:
  rollbook classify staff.xlsx
  rollbook classify staff.xlsx -o report.xlsx
  rollbook classify staff.csv --delimiter ';' -o report.json
  rollbook classify staff.xlsx --sheet 'March' --json > report.json")]
    Classify {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: export.output_file from settings)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also print the report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Quiet mode - no summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Print the summary counts and count matrix without writing a file
    #[command(after_help = "\
Examples:
  rollbook summary staff.xlsx
  rollbook summary staff.csv --json | jq .total")]
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate columns and attribute values without classifying
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the input table as it will be read (normalized headers)
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Number of rows to show
        #[arg(long, short = 'n', default_value = "20")]
        rows: usize,
    },

    /// Settings file management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the path of the user settings file
    Path,

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  rollbook-roster ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Classify { input, output, json, quiet } => cmd_classify(input, output, json, quiet),
        Commands::Summary { input, json } => cmd_summary(input, json),
        Commands::Check { input } => cmd_check(input),
        Commands::Preview { input, rows } => cmd_preview(input, rows),
        Commands::Config { command } => match command {
            ConfigCommands::Path => cmd_config_path(),
            ConfigCommands::Init { force } => cmd_config_init(force),
        },
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ClassifyError> for CliError {
    fn from(err: ClassifyError) -> Self {
        let hint = match &err {
            ClassifyError::MissingColumn { .. } => {
                "the first row must name the columns Name, Attendance and Discipline (any case)"
            }
            ClassifyError::InvalidAttribute { .. } => {
                "attendance and discipline must be 0 or 1; fix the row and re-run"
            }
        };
        Self { code: classify_exit_code(&err), message: err.to_string(), hint: Some(hint.into()) }
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        let hint = match &err {
            IoError::SheetNotFound { .. } => Some("pass one of the available names to --sheet"),
            IoError::UnsupportedFormat(_) => Some("save the roster as .xlsx or .csv"),
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint: hint.map(Into::into) }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self { code: EXIT_CONFIG, message: err.to_string(), hint: None }
    }
}

// ============================================================================
// shared input handling
// ============================================================================

fn load_settings(config: Option<&Path>) -> Result<Settings, CliError> {
    match config {
        Some(path) => Ok(Settings::from_toml_file(path)?),
        None => Ok(Settings::load()),
    }
}

/// Resolve settings and read the input table. CLI flags win over settings.
fn load_input(args: &InputArgs) -> Result<(Settings, Table), CliError> {
    let settings = load_settings(args.config.as_deref())?;

    let delimiter = match args.delimiter.or(settings.input.delimiter) {
        Some(d) => Some(
            delimiter_byte(d).ok_or_else(|| CliError::args(format!("--{}, got {d:?}", DELIMITER_RULE)))?,
        ),
        None => None,
    };
    let options = ReadOptions {
        sheet: args.sheet.clone().or_else(|| settings.input.sheet.clone()),
        delimiter,
    };

    let table = rollbook_io::read_table(&args.input, &options)?;
    log::info!("read {} rows from {}", table.len(), args.input.display());
    Ok((settings, table))
}

fn export_style(settings: &Settings) -> ExportStyle {
    ExportStyle {
        name_delimiter: settings.export.name_delimiter.clone(),
        grid_column_width: settings.export.matrix_column_width,
        borders: settings.export.borders,
    }
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn print_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes()).map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// classify
// ============================================================================

fn cmd_classify(input: InputArgs, output: Option<PathBuf>, json: bool, quiet: bool) -> Result<(), CliError> {
    let (settings, table) = load_input(&input)?;
    let bundle = rollbook_roster::run(&table)?;

    let output = output.unwrap_or_else(|| PathBuf::from(&settings.export.output_file));
    write_report(&bundle, &output, &settings)?;

    if json {
        let json_str = rollbook_io::json::to_string(&bundle).map_err(|e| CliError { code: EXIT_ERROR, message: e, hint: None })?;
        print_stdout(&json_str)?;
        print_stdout("\n")?;
    }

    if !quiet {
        let s = &bundle.summary;
        eprintln!(
            "classified {} records: {} good attendance, {} good discipline, {} both good, {} both poor",
            s.total, s.good_attendance, s.good_discipline, s.both_good, s.both_poor
        );
        eprintln!("wrote {}", output.display());
    }

    Ok(())
}

fn write_report(bundle: &ReportBundle, output: &Path, settings: &Settings) -> Result<(), CliError> {
    if is_json_path(output) {
        rollbook_io::json::export(bundle, output)?;
    } else {
        let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("xlsx") {
            return Err(CliError::args(format!("cannot write '{}': output must be .xlsx or .json", output.display()))
                .with_hint("name the output file report.xlsx or report.json"));
        }
        rollbook_io::xlsx::export(bundle, output, &export_style(settings))?;
    }
    Ok(())
}

// ============================================================================
// summary / check / preview
// ============================================================================

fn cmd_summary(input: InputArgs, json: bool) -> Result<(), CliError> {
    let (_, table) = load_input(&input)?;
    let bundle = rollbook_roster::run(&table)?;

    if json {
        let json_str = serde_json::to_string_pretty(&bundle.summary)
            .map_err(|e| CliError { code: EXIT_ERROR, message: format!("JSON serialization error: {e}"), hint: None })?;
        print_stdout(&json_str)?;
        return print_stdout("\n");
    }

    print_stdout(&render::format_summary(&bundle.summary))?;
    print_stdout("\n")?;
    print_stdout(&render::format_counts(&bundle.counts))
}

fn cmd_check(input: InputArgs) -> Result<(), CliError> {
    let (_, table) = load_input(&input)?;
    let count = rollbook_roster::validate(&table)?;
    print_stdout(&format!("ok: {count} records\n"))
}

fn cmd_preview(input: InputArgs, rows: usize) -> Result<(), CliError> {
    let (_, table) = load_input(&input)?;
    let columns: Vec<String> = table.columns.iter().map(|c| normalize_header(c)).collect();
    print_stdout(&render::format_table(&columns, &table.rows, rows))?;

    if let Err(e) = rollbook_roster::schema::normalize(&table) {
        log::warn!("{e}");
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config_path() -> Result<(), CliError> {
    print_stdout(&format!("{}\n", Settings::config_path().display()))
}

fn cmd_config_init(force: bool) -> Result<(), CliError> {
    let path = Settings::config_path();
    if path.exists() && !force {
        return Err(CliError::args(format!("{} already exists", path.display()))
            .with_hint("pass --force to overwrite it with defaults"));
    }
    let path = Settings::default().save()?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
