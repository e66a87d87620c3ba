//! Child-process executor backed by `tokio::process`.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use contracts::{
    ContractError, OutputMode, StageExecutor, StageResult, StageSpec, UNKNOWN_EXIT_CODE,
};
use tokio::process::Command;
use tracing::{debug, instrument};

/// Runs stages as real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    /// Directory the children run in (None = inherit)
    working_dir: Option<PathBuf>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every stage inside `dir`
    pub fn with_working_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }

    fn command(&self, stage: &StageSpec) -> Command {
        let mut command = Command::new(&stage.program);
        command.args(&stage.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl StageExecutor for ProcessExecutor {
    #[instrument(
        name = "process_execute",
        skip(self, stage),
        fields(stage = %stage.name, command = %stage.command_line(), ?mode)
    )]
    async fn execute(
        &self,
        stage: &StageSpec,
        mode: OutputMode,
    ) -> Result<StageResult, ContractError> {
        let mut command = self.command(stage);
        let wait_error = |source| ContractError::StageWait {
            stage: stage.name.clone(),
            source,
        };

        match mode {
            OutputMode::Stream => {
                command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
                let mut child = command
                    .spawn()
                    .map_err(|e| ContractError::stage_spawn(&stage.name, &stage.program, e))?;
                debug!(pid = ?child.id(), "Stage process spawned");

                let status = child.wait().await.map_err(wait_error)?;
                Ok(StageResult::streamed(exit_code_of(status)))
            }
            OutputMode::Capture => {
                // Output is hidden, so a prompt would block unseen; stdin reads EOF.
                command
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let child = command
                    .spawn()
                    .map_err(|e| ContractError::stage_spawn(&stage.name, &stage.program, e))?;
                debug!(pid = ?child.id(), "Stage process spawned");

                let output = child.wait_with_output().await.map_err(wait_error)?;
                Ok(StageResult::captured(
                    exit_code_of(output.status),
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                ))
            }
        }
    }
}

/// Map a process exit status to a single integer code
///
/// A child killed by a signal reports `128 + signal`, as shells do.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}
