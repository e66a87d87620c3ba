//! # Report
//!
//! Experiment report: loads the metrics and parameters artifacts written by
//! the pipeline stages and renders them as console text.
//!
//! - Metrics: flat JSON object, metric name -> number
//! - Parameters: YAML, section -> key -> value
//! - A missing artifact is not an error; its section is omitted
//! - An artifact that exists but cannot be parsed is an error

mod error;
mod metrics;
mod params;
mod summary;

pub use error::{ReportError, Result};
pub use metrics::MetricsRecord;
pub use params::{ParamSection, ParametersRecord};
pub use summary::ExperimentReport;

use std::io;
use std::path::Path;

use tracing::debug;

/// Read an artifact; `None` when the file does not exist
fn read_artifact(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Artifact not found, skipping");
            Ok(None)
        }
        Err(e) => Err(ReportError::read(path, e)),
    }
}
