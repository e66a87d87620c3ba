//! # mlpipe CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 流水线定义加载与验证
//! - 顺序执行各 stage（首个失败即停止）
//! - 实验结果（metrics / params）报告

mod cli;
mod commands;
mod console;
mod context;
mod error;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_experiment, run_pipeline, run_stages, run_validate};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on CLI options
    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "mlpipe starting");

    // Execute command
    let result = match &cli.command {
        Commands::Run(args) => run_pipeline(&cli.pipeline, args).await,
        Commands::Experiment(args) => run_experiment(&cli.pipeline, args).await,
        Commands::Stages(args) => run_stages(&cli.pipeline, args),
        Commands::Validate(args) => run_validate(&cli.pipeline, args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(ObservabilityConfig::from_verbosity(
        cli.verbose,
        cli.quiet,
        cli.log_format.into(),
    ))
}
