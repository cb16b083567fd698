//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;
use udf_cli::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "udf",
    version,
    about = "Compile field descriptors into form fields and table columns",
    long_about = "Compile metadata-driven field descriptors into form field and table column \
                  configurations.\n\n\
                  Descriptors are read from JSON or CSV files. Engine settings (label and header \
                  prefixes, special types, column groups) come from a TOML file given with \
                  --config or the UDF_CONFIG environment variable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Engine configuration file (TOML). Falls back to $UDF_CONFIG.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a class descriptor into form fields.
    Compile(CompileArgs),

    /// Compile table columns and optionally sort/filter a row file.
    Columns(ColumnsArgs),

    /// Decode a parameter map into a dynamic model.
    Decode(DecodeArgs),

    /// Encode a dynamic model into a parameter map.
    Encode(EncodeArgs),

    /// Build a sorted option list from a CSV file.
    Options(OptionsArgs),

    /// List the special types registered from the configuration.
    SpecialTypes(OutputArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct CompileArgs {
    /// Class descriptor file (.json or .csv).
    #[arg(value_name = "CLASS_FILE")]
    pub class_file: PathBuf,

    /// Label key prefix (overrides the configuration file).
    #[arg(long = "label-prefix", value_name = "PREFIX")]
    pub label_prefix: Option<String>,

    /// Fail when a descriptor has no input representation instead of skipping it.
    #[arg(long = "fail-on-unmapped")]
    pub fail_on_unmapped: bool,

    /// Options CSV for an enumeration, as ENUM_TYPE=PATH; repeatable.
    #[arg(long = "options", value_name = "ENUM_TYPE=PATH")]
    pub options: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Class descriptor file (.json or .csv).
    #[arg(value_name = "CLASS_FILE")]
    pub class_file: PathBuf,

    /// JSON array of row objects to render.
    #[arg(long = "rows", value_name = "PATH")]
    pub rows: Option<PathBuf>,

    /// JSON object of translation key to display text.
    #[arg(long = "translations", value_name = "PATH")]
    pub translations: Option<PathBuf>,

    /// Sort key as FIELD[:asc|desc]; repeat for secondary keys.
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Vec<String>,

    /// Row filter as FIELD:PREDICATE:VALUE; repeat to combine.
    #[arg(long = "filter", value_name = "FILTER")]
    pub filter: Vec<String>,

    /// Hide a column by field name; repeatable.
    #[arg(long = "hide", value_name = "FIELD")]
    pub hide: Vec<String>,

    /// Header key prefix (overrides the configuration file).
    #[arg(long = "header-prefix", value_name = "PREFIX")]
    pub header_prefix: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Class descriptor file (.json or .csv).
    #[arg(value_name = "CLASS_FILE")]
    pub class_file: PathBuf,

    /// Parameter map JSON file.
    #[arg(value_name = "PARAMS_FILE")]
    pub params_file: PathBuf,

    /// Extra key written into the model, as FIELD=VALUE.
    #[arg(long = "seed", value_name = "FIELD=VALUE")]
    pub seed: Option<String>,

    /// Validate the decoded model against the compiled form.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Reference day for date rules (default: today).
    #[arg(long = "today", value_name = "YYYY-MM-DD")]
    pub today: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Class descriptor file (.json or .csv).
    #[arg(value_name = "CLASS_FILE")]
    pub class_file: PathBuf,

    /// Dynamic model JSON file.
    #[arg(value_name = "MODEL_FILE")]
    pub model_file: PathBuf,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// CSV with Key, Category, Sub-Category and Kind columns.
    #[arg(value_name = "OPTIONS_FILE")]
    pub options_file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
