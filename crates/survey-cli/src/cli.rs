//! CLI argument definitions for survey column detection.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-columns",
    version,
    about = "Detect the semantic role of each column in a survey export",
    long_about = "Detect the semantic role of each column in a survey export.\n\n\
                  Roles are inferred from cell contents, so exports with renamed or\n\
                  reordered headers are still understood."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow survey answers to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect column roles in a CSV export.
    Detect(DetectArgs),

    /// Summarize cancellation reasons with priorities.
    Reasons(ReasonsArgs),

    /// Write a CSV with one role-named column per detected role.
    Extract(ExtractArgs),

    /// List roles in detection order.
    Roles,
}

/// Options shared by every command that runs detection.
#[derive(Args, Debug, Clone, Default)]
pub struct DetectionArgs {
    /// JSON file with detection options; missing fields keep their defaults.
    #[arg(long = "options", value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Minimum fraction of numeric rows for the numeric score role.
    #[arg(long = "min-numeric-fraction", value_name = "FRACTION")]
    pub min_numeric_fraction: Option<f64>,

    /// Multiplier applied to categorical candidates with a matching name.
    #[arg(long = "bonus-multiplier", value_name = "FACTOR")]
    pub bonus_multiplier: Option<f64>,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Survey export in CSV format.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Print every candidate score with its components.
    #[arg(long = "explain")]
    pub explain: bool,

    /// Output format for the role mapping.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[derive(Parser)]
pub struct ReasonsArgs {
    /// Survey export in CSV format.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Column to summarize (default: the detected exit reason column).
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Survey export in CSV format.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Destination CSV file.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Keep rows whose freeform answer is only numbers or symbols.
    #[arg(long = "keep-numeric-responses")]
    pub keep_numeric_responses: bool,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
