//! `experiment` command implementation.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use contracts::{OutputMode, StageExecutor, StageSpec};
use report::ExperimentReport;
use runner::StageRunner;
use tracing::{info, warn};

use crate::cli::{ExperimentArgs, PipelineArgs};
use crate::console::ExperimentConsole;
use crate::context::PipelineContext;
use crate::error::CliError;

/// Where the report reads its artifacts from
struct Artifacts<'a> {
    metrics: &'a Path,
    params: &'a Path,
}

/// Execute the `experiment` command
///
/// Any stage failure exits 1 without reading artifacts.
pub async fn run_experiment(pipeline: &PipelineArgs, args: &ExperimentArgs) -> Result<ExitCode> {
    let context = PipelineContext::resolve(pipeline)?;
    let stages = context.stages();
    let metrics_path = context.metrics_path(args.metrics.as_deref());
    let params_path = context.params_path(args.params.as_deref());

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    info!(started_at = %timestamp, stages = stages.len(), "Experiment starting");

    let runner = StageRunner::new(context.executor(), OutputMode::Capture);
    let mut console = ExperimentConsole::stdout();
    let artifacts = Artifacts {
        metrics: &metrics_path,
        params: &params_path,
    };

    let code = drive_experiment(&runner, &stages, &artifacts, &timestamp, &mut console).await?;
    Ok(ExitCode::from(code))
}

/// Run the stages, then the report; returns the process exit code
async fn drive_experiment<E: StageExecutor, W: Write>(
    runner: &StageRunner<E>,
    stages: &[StageSpec],
    artifacts: &Artifacts<'_>,
    timestamp: &str,
    console: &mut ExperimentConsole<W>,
) -> Result<u8> {
    console.started(timestamp);
    let summary = runner.run(stages, console).await;

    if let Some(failure) = &summary.failure {
        warn!(
            stage = %failure.name,
            exit_code = failure.exit_code,
            "Experiment aborted, skipping report"
        );
        console.failed();
        return Ok(1);
    }

    let report = ExperimentReport::load(artifacts.metrics, artifacts.params)
        .map_err(CliError::from)
        .context("Experiment stages succeeded but the report could not be produced")?;

    console.report(&report);
    console.tracked();

    info!(
        duration_secs = summary.duration.as_secs_f64(),
        "Experiment completed"
    );
    Ok(0)
}
