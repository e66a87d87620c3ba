//! Progress callbacks for a run.

use std::time::Duration;

use contracts::{RunSummary, StageFailure, StageResult, StageSpec};

/// Observer notified as the runner walks the stage list
///
/// All methods default to no-ops; `()` is the silent reporter.
pub trait StageReporter {
    /// Called before a stage is launched
    fn stage_started(&mut self, index: usize, total: usize, stage: &StageSpec) {
        let _ = (index, total, stage);
    }

    /// Called after a stage exits with code 0
    fn stage_succeeded(&mut self, stage: &StageSpec, result: &StageResult, elapsed: Duration) {
        let _ = (stage, result, elapsed);
    }

    /// Called once, for the first failing stage
    fn stage_failed(&mut self, failure: &StageFailure) {
        let _ = failure;
    }

    /// Called once at the end of the run, success or not
    fn run_finished(&mut self, summary: &RunSummary) {
        let _ = summary;
    }
}

impl StageReporter for () {}
