//! RunSummary - Runner output
//!
//! What happened during one pass over the stage list.

use std::time::Duration;

/// A stage that ran to completion with exit code 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedStage {
    pub name: String,
    pub duration: Duration,
}

/// The first (and only) failing stage of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    /// Zero-based position in the stage list
    pub index: usize,

    /// Stage display name
    pub name: String,

    /// Nonzero exit code
    pub exit_code: i32,

    /// Captured stderr, or the spawn error message
    pub stderr: Option<String>,
}

impl StageFailure {
    /// Exit code to hand to the OS
    ///
    /// Codes outside `1..=255` cannot be represented faithfully and map to 1.
    pub fn process_exit_code(&self) -> u8 {
        match u8::try_from(self.exit_code) {
            Ok(0) | Err(_) => 1,
            Ok(code) => code,
        }
    }
}

/// Summary of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Stages that succeeded, in order
    pub completed: Vec<CompletedStage>,

    /// First failure; later stages were never started
    pub failure: Option<StageFailure>,

    /// Wall time of the whole run
    pub duration: Duration,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of stages that were started (completed plus the failed one)
    pub fn stages_started(&self) -> usize {
        self.completed.len() + usize::from(self.failure.is_some())
    }
}
