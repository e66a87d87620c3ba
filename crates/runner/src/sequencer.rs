//! Fail-fast sequential stage runner.

use std::time::Instant;

use contracts::{
    error_chain, CompletedStage, ContractError, OutputMode, RunSummary, StageExecutor, StageFailure,
    StageResult, StageSpec, SPAWN_FAILURE_EXIT_CODE, UNKNOWN_EXIT_CODE,
};
use tracing::{debug, error, info};

use crate::StageReporter;

/// Runs a stage list one stage at a time, stopping at the first failure
#[derive(Debug)]
pub struct StageRunner<E> {
    executor: E,
    mode: OutputMode,
}

impl<E: StageExecutor> StageRunner<E> {
    pub fn new(executor: E, mode: OutputMode) -> Self {
        Self { executor, mode }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run `stages` in order
    ///
    /// Each stage is awaited before the next starts. The first stage that
    /// exits nonzero, or cannot be launched at all, ends the run; later
    /// stages are never invoked.
    pub async fn run<R: StageReporter>(&self, stages: &[StageSpec], reporter: &mut R) -> RunSummary {
        let run_start = Instant::now();
        let total = stages.len();
        let mut summary = RunSummary::default();

        for (index, stage) in stages.iter().enumerate() {
            info!(stage = %stage.name, index, total, command = %stage.command_line(), "Stage started");
            reporter.stage_started(index, total, stage);

            let stage_start = Instant::now();
            let result = match self.executor.execute(stage, self.mode).await {
                Ok(result) => result,
                Err(e) => launch_failure(stage, e),
            };
            let elapsed = stage_start.elapsed();

            if result.is_success() {
                info!(
                    stage = %stage.name,
                    duration_ms = elapsed.as_millis() as u64,
                    "Stage completed"
                );
                if let Some(stdout) = result.stdout.as_deref().filter(|s| !s.is_empty()) {
                    debug!(stage = %stage.name, stdout, "Captured stage output");
                }
                reporter.stage_succeeded(stage, &result, elapsed);
                summary.completed.push(CompletedStage {
                    name: stage.name.clone(),
                    duration: elapsed,
                });
                continue;
            }

            error!(
                stage = %stage.name,
                index,
                exit_code = result.exit_code,
                skipped = total - index - 1,
                "Stage failed, aborting pipeline"
            );
            let failure = StageFailure {
                index,
                name: stage.name.clone(),
                exit_code: result.exit_code,
                stderr: result.stderr,
            };
            reporter.stage_failed(&failure);
            summary.failure = Some(failure);
            break;
        }

        summary.duration = run_start.elapsed();
        reporter.run_finished(&summary);
        summary
    }
}

/// Turn an executor error into a failed result so launch problems share the
/// nonzero-exit path.
fn launch_failure(stage: &StageSpec, error: ContractError) -> StageResult {
    let exit_code = match error {
        ContractError::StageSpawn { .. } => SPAWN_FAILURE_EXIT_CODE,
        _ => UNKNOWN_EXIT_CODE,
    };
    let message = error_chain(&error);
    error!(stage = %stage.name, error = %message, exit_code, "Stage could not be run");
    StageResult {
        exit_code,
        stdout: None,
        stderr: Some(message),
    }
}
