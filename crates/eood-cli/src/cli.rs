//! CLI argument definitions for sales OOD screening.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use eood_core::Scope;
use eood_model::OodType;

use eood_cli::render::DEFAULT_MAX_ROWS;

#[derive(Parser)]
#[command(
    name = "eood",
    version,
    about = "Sales OOD screening - flag new, off-target and spiking sales records",
    long_about = "Classify sales records as in-distribution or out-of-distribution.\n\n\
                  Records are checked for new products, KPI deviation and statistical\n\
                  spikes, in that order. Sources may be CSV, JSON or Excel."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a sales file and show the enriched records.
    Analyze(AnalyzeArgs),

    /// Show the KPI registry built from a KPI file.
    Kpi(KpiArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Sales file (CSV, JSON or Excel).
    #[arg(long = "sales", value_name = "PATH")]
    pub sales: PathBuf,

    /// KPI file (CSV, JSON or Excel). Without it the KPI rule never fires.
    #[arg(long = "kpi", value_name = "PATH")]
    pub kpi: Option<PathBuf>,

    /// JSON configuration with thresholds and column aliases.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Relative KPI deviation above which a record is flagged.
    #[arg(long = "deviation-threshold", value_name = "RATIO")]
    pub deviation_threshold: Option<f64>,

    /// Absolute z-score above which a record is flagged as a spike.
    #[arg(long = "spike-threshold", value_name = "Z")]
    pub spike_threshold: Option<f64>,

    /// Restrict the view to in-distribution or out-of-distribution records.
    #[arg(long = "scope", value_enum, default_value = "all")]
    pub scope: ScopeArg,

    /// Only show records of this OOD type.
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub ood_type: Option<OodTypeArg>,

    /// Case-insensitive text search across all fields.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Maximum number of rows to print.
    #[arg(long = "max-rows", default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    /// Comma-separated columns to display.
    #[arg(long = "columns", value_name = "NAMES", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Write the filtered records to this file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Export format (defaults to the output file extension).
    #[arg(long = "output-format", value_enum)]
    pub output_format: Option<OutputFormatArg>,
}

#[derive(Parser)]
pub struct KpiArgs {
    /// KPI file (CSV, JSON or Excel).
    #[arg(long = "kpi", value_name = "PATH")]
    pub kpi: PathBuf,

    /// JSON configuration with column aliases.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI scope choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    All,
    Id,
    Ood,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => Scope::All,
            ScopeArg::Id => Scope::InDistribution,
            ScopeArg::Ood => Scope::OutOfDistribution,
        }
    }
}

/// CLI OOD type choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OodTypeArg {
    Id,
    New,
    Kpi,
    Spike,
}

impl From<OodTypeArg> for OodType {
    fn from(arg: OodTypeArg) -> Self {
        match arg {
            OodTypeArg::Id => OodType::Id,
            OodTypeArg::New => OodType::New,
            OodTypeArg::Kpi => OodType::Kpi,
            OodTypeArg::Spike => OodType::Spike,
        }
    }
}

/// CLI export format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
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
