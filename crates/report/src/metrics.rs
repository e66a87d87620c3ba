//! Metrics artifact: flat metric name -> number mapping.

use std::fmt;
use std::path::Path;

use contracts::ContractError;
use serde_json::{Map, Value};

use crate::{read_artifact, ReportError, Result};

/// Metric values in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsRecord {
    entries: Vec<(String, f64)>,
}

impl MetricsRecord {
    /// Load from `path`; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        read_artifact(path)?
            .map(|content| Self::parse(&content, path))
            .transpose()
    }

    /// Parse JSON content; `origin` is only used in error messages
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(content).map_err(|e| {
            ContractError::artifact_parse(origin, format!("expected a JSON object: {e}"))
        })?;

        let entries = object
            .into_iter()
            .map(|(metric, value)| match value.as_f64() {
                Some(number) => Ok((metric, number)),
                None => Err(ReportError::NonNumericMetric {
                    path: origin.to_path_buf(),
                    metric,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, value)| *value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One line per metric: name left-aligned in 15 columns, value to 4 decimals
impl fmt::Display for MetricsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (metric, value) in &self.entries {
            writeln!(f, "  {metric:<15}: {value:.4}")?;
        }
        Ok(())
    }
}
