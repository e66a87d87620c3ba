//! Experiment report assembly.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::{MetricsRecord, ParametersRecord, Result};

const RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

/// Everything printed after a successful experiment run
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentReport {
    /// None when the metrics artifact is absent
    pub metrics: Option<MetricsRecord>,

    /// None when the parameters artifact is absent
    pub params: Option<ParametersRecord>,

    /// Where parameters are edited (shown in the tips)
    pub params_path: PathBuf,
}

impl ExperimentReport {
    /// Load both artifacts
    ///
    /// # Errors
    /// Fails if an artifact exists but cannot be read or parsed. Absent
    /// artifacts are skipped.
    pub fn load(metrics_path: &Path, params_path: &Path) -> Result<Self> {
        let metrics = MetricsRecord::load(metrics_path)?;
        let params = ParametersRecord::load(params_path)?;

        info!(
            metrics_path = %metrics_path.display(),
            metrics = metrics.as_ref().map_or(0, MetricsRecord::len),
            params_path = %params_path.display(),
            params_found = params.is_some(),
            "Experiment artifacts loaded"
        );

        Ok(Self {
            metrics,
            params,
            params_path: params_path.to_path_buf(),
        })
    }

    /// Static usage tips closing the report
    pub fn tips(&self) -> Vec<String> {
        vec![
            format!("Change parameters in {}", self.params_path.display()),
            "Run `mlpipe experiment` again to create a new experiment".to_string(),
            "Use: dvc exp show (to view all experiments)".to_string(),
            "Use: dvc metrics show (to see metrics)".to_string(),
        ]
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let section_rule = "-".repeat(SECTION_RULE_WIDTH);

        writeln!(f, "\n{rule}")?;
        writeln!(f, "Experiment Results")?;
        writeln!(f, "{rule}")?;

        if let Some(metrics) = &self.metrics {
            writeln!(f, "\n📊 Model Performance Metrics:")?;
            writeln!(f, "{section_rule}")?;
            write!(f, "{metrics}")?;
        }

        if let Some(params) = &self.params {
            writeln!(f, "\n⚙️  Parameters Used:")?;
            writeln!(f, "{section_rule}")?;
            write!(f, "{params}")?;
        }

        writeln!(f, "\n{rule}")?;
        writeln!(f, "💡 Tips:")?;
        for tip in self.tips() {
            writeln!(f, "  - {tip}")?;
        }
        writeln!(f, "{rule}")
    }
}
