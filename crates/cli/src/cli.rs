//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mlpipe - Sequential runner for ML pipeline stages
#[derive(Parser, Debug)]
#[command(
    name = "mlpipe",
    author,
    version,
    about = "Run ML pipeline stages in order, stopping at the first failure",
    long_about = "Runs a fixed, ordered list of pipeline stage programs one at a time.\n\n\
                  `run` streams each stage's output and exits with the failing stage's code.\n\
                  `experiment` captures stage output and, on success, prints the metrics \n\
                  and parameters the stages produced."
)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "MLPIPE_VERBOSE")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (logs go to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "MLPIPE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that resolves the stage list
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Pipeline definition file (TOML or JSON); built-in stages when omitted
    #[arg(short, long, global = true, env = "MLPIPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory stages run in; relative artifact paths resolve against it
    #[arg(short = 'C', long, global = true, env = "MLPIPE_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Override the interpreter used to launch stage scripts
    #[arg(long, global = true, env = "MLPIPE_INTERPRETER")]
    pub interpreter: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every stage with live output; exit with the failing stage's code
    Run(RunArgs),

    /// Run every stage as an experiment and print metrics and parameters
    Experiment(ExperimentArgs),

    /// List the resolved stages without running them
    Stages(StagesArgs),

    /// Validate the pipeline definition without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Print the stages that would run and exit
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `experiment` command
#[derive(Args, Debug, Clone, Default)]
pub struct ExperimentArgs {
    /// Metrics artifact (JSON), overrides the pipeline definition
    #[arg(long, env = "MLPIPE_METRICS")]
    pub metrics: Option<PathBuf>,

    /// Parameters artifact (YAML), overrides the pipeline definition
    #[arg(long, env = "MLPIPE_PARAMS")]
    pub params: Option<PathBuf>,
}

/// Arguments for the `stages` command
#[derive(Args, Debug, Clone, Default)]
pub struct StagesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
