//! Report error types

use std::path::PathBuf;

use contracts::ContractError;
use thiserror::Error;

/// Report-specific errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Artifact exists but could not be read
    #[error("failed to read artifact '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metric value is not numeric
    #[error("metric '{metric}' in '{}' is not a number", path.display())]
    NonNumericMetric { path: PathBuf, metric: String },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl ReportError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, ReportError>;
