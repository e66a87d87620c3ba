//! `run` command implementation.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use contracts::{OutputMode, StageExecutor, StageSpec};
use runner::StageRunner;
use tracing::{info, warn};

use crate::cli::{PipelineArgs, RunArgs};
use crate::commands::stages::print_stage_list;
use crate::console::PipelineConsole;
use crate::context::PipelineContext;

/// Execute the `run` command
///
/// Exits with the failing stage's own exit code.
pub async fn run_pipeline(pipeline: &PipelineArgs, args: &RunArgs) -> Result<ExitCode> {
    let context = PipelineContext::resolve(pipeline)?;
    let stages = context.stages();

    // Dry run - just list and exit
    if args.dry_run {
        info!("Dry run mode - no stages will be launched");
        print_stage_list(&context, &stages);
        return Ok(ExitCode::SUCCESS);
    }

    let runner = StageRunner::new(context.executor(), OutputMode::Stream);
    let mut console = PipelineConsole::stdout();

    let code = drive_pipeline(&runner, &stages, &mut console).await;
    Ok(ExitCode::from(code))
}

/// Run every stage with banners; returns the process exit code
async fn drive_pipeline<E: StageExecutor, W: Write>(
    runner: &StageRunner<E>,
    stages: &[StageSpec],
    console: &mut PipelineConsole<W>,
) -> u8 {
    console.header();
    let summary = runner.run(stages, console).await;

    match &summary.failure {
        Some(failure) => {
            warn!(
                stage = %failure.name,
                exit_code = failure.exit_code,
                "Pipeline stopped"
            );
            failure.process_exit_code()
        }
        None => {
            info!(
                stages = summary.completed.len(),
                duration_secs = summary.duration.as_secs_f64(),
                "Pipeline completed successfully"
            );
            console.completed(&summary);
            0
        }
    }
}
