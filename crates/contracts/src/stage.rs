//! Stage model - input and output of a single stage invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Exit code reported when a stage executable cannot be launched.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Exit code reported when the OS gives no code and no signal.
pub const UNKNOWN_EXIT_CODE: i32 = 1;

/// A resolved, runnable stage
///
/// `program` is spawned directly (no shell) with `args` appended in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSpec {
    /// Display label (e.g. "Data Ingestion")
    pub name: String,

    /// Executable to launch
    pub program: String,

    /// Arguments passed to the executable
    pub args: Vec<String>,
}

impl StageSpec {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Command line as it would be typed in a shell (display only)
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for StageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.command_line())
    }
}

/// How a stage's standard streams are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Inherit the parent's stdout/stderr; output appears live
    #[default]
    Stream,
    /// Collect stdout/stderr into the `StageResult`
    Capture,
}

/// Outcome of one stage invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageResult {
    /// Process exit code (0 = success)
    pub exit_code: i32,

    /// Captured standard output (`Capture` mode only)
    pub stdout: Option<String>,

    /// Captured standard error (`Capture` mode only)
    pub stderr: Option<String>,
}

impl StageResult {
    /// Result of a streamed invocation
    pub fn streamed(exit_code: i32) -> Self {
        Self {
            exit_code,
            stdout: None,
            stderr: None,
        }
    }

    /// Result of a captured invocation
    pub fn captured(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: Some(stdout.into()),
            stderr: Some(stderr.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
