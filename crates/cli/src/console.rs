//! Console progress output for the two runners.
//!
//! Write errors on the console are ignored; a closed stdout must not change
//! the outcome of a run.

use std::io::{self, Write};
use std::time::Duration;

use contracts::{RunSummary, StageFailure, StageResult, StageSpec};
use runner::StageReporter;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Banner-style output for `mlpipe run`
///
/// Stage output is streamed straight to the terminal between the banners.
pub struct PipelineConsole<W: Write = io::Stdout> {
    out: W,
}

impl PipelineConsole {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PipelineConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self) {
        let rule = rule();
        let _ = writeln!(self.out, "\n{rule}\nStarting ML Pipeline Execution\n{rule}");
    }

    /// Completion banner, run statistics and suggested next steps
    pub fn completed(&mut self, summary: &RunSummary) {
        let rule = rule();
        let _ = writeln!(
            self.out,
            "\n{rule}\n✅ Pipeline Execution Completed Successfully!\n{rule}"
        );
        let _ = writeln!(
            self.out,
            "   Stages run: {}   Total time: {:.2}s",
            summary.completed.len(),
            summary.duration.as_secs_f64()
        );
        let _ = writeln!(self.out, "\nNext Steps:");
        let _ = writeln!(self.out, "1. Check metrics: dvc metrics show");
        let _ = writeln!(self.out, "2. View plots: dvc plots show");
        let _ = writeln!(self.out, "3. Check outputs in:");
        for dir in [
            "data/raw/",
            "data/interim/",
            "data/processed/",
            "models/",
            "reports/",
            "dvclive/",
        ] {
            let _ = writeln!(self.out, "   - {dir}");
        }
        let _ = self.out.flush();
    }
}

impl<W: Write> StageReporter for PipelineConsole<W> {
    fn stage_started(&mut self, _index: usize, _total: usize, stage: &StageSpec) {
        let rule = rule();
        let _ = writeln!(self.out, "\n{rule}\nRunning Stage: {}\n{rule}\n", stage.name);
        // The child writes to the same terminal next.
        let _ = self.out.flush();
    }

    fn stage_succeeded(&mut self, stage: &StageSpec, _result: &StageResult, _elapsed: Duration) {
        let _ = writeln!(self.out, "\n✅ Stage '{}' completed successfully", stage.name);
    }

    fn stage_failed(&mut self, failure: &StageFailure) {
        if let Some(stderr) = failure.stderr.as_deref() {
            let _ = writeln!(self.out, "\n{}", stderr.trim_end());
        }
        let _ = writeln!(
            self.out,
            "\n❌ Error: Stage '{}' failed with exit code {}",
            failure.name, failure.exit_code
        );
        let _ = self.out.flush();
    }
}

/// Compact output for `mlpipe experiment`
///
/// Stage output is captured; only the failing stage's stderr is shown.
pub struct ExperimentConsole<W: Write = io::Stdout> {
    out: W,
}

impl ExperimentConsole {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ExperimentConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn started(&mut self, timestamp: &str) {
        let rule = rule();
        let _ = writeln!(self.out, "\n🔬 Starting Experiment - {timestamp}");
        let _ = writeln!(self.out, "\n{rule}\nRunning ML Pipeline as Experiment\n{rule}");
    }

    pub fn report(&mut self, report: &report::ExperimentReport) {
        let _ = write!(self.out, "{report}");
    }

    pub fn tracked(&mut self) {
        let _ = writeln!(self.out, "\n✅ Experiment completed and tracked!");
        let _ = writeln!(self.out, "   Run 'dvc exp show' to see all experiments\n");
        let _ = self.out.flush();
    }

    pub fn failed(&mut self) {
        let _ = writeln!(self.out, "\n❌ Experiment failed!");
        let _ = self.out.flush();
    }
}

impl<W: Write> StageReporter for ExperimentConsole<W> {
    fn stage_started(&mut self, _index: usize, _total: usize, stage: &StageSpec) {
        let _ = writeln!(self.out, "\n▶ Running: {}", stage.name);
        let _ = self.out.flush();
    }

    fn stage_failed(&mut self, failure: &StageFailure) {
        let _ = writeln!(self.out, "❌ Failed: {}", failure.name);
        if let Some(stderr) = failure.stderr.as_deref() {
            let _ = writeln!(self.out, "{stderr}");
        }
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        if summary.is_success() {
            let _ = writeln!(self.out, "\n✅ Pipeline completed successfully!");
        }
    }
}
