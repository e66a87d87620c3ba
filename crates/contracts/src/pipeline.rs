//! PipelineDefinition - Config Loader output
//!
//! Describes the ordered stage list, the interpreter used to launch stage
//! scripts, and where the experiment report finds its artifacts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::StageSpec;

/// Interpreter used by the built-in pipeline
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Default metrics artifact location (relative to the working directory)
pub const DEFAULT_METRICS_PATH: &str = "reports/metrics.json";

/// Default parameters artifact location (relative to the working directory)
pub const DEFAULT_PARAMS_PATH: &str = "params.yaml";

/// Built-in stages, in execution order
const DEFAULT_STAGES: [(&str, &str); 5] = [
    ("Data Ingestion", "src/data_ingestion.py"),
    ("Data Preprocessing", "src/data_preprocessing.py"),
    ("Feature Engineering", "src/feature_engineering.py"),
    ("Model Building", "src/model_building.py"),
    ("Model Evaluation", "src/model_evaluation.py"),
];

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline definition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PipelineDefinition {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Program that runs each stage command (e.g. "python3").
    /// When unset, stage commands are executed directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Stages in execution order
    #[validate(length(min = 1, message = "pipeline must define at least one stage"))]
    pub stages: Vec<StageConfig>,

    /// Report artifact locations
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

/// One stage as written in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StageConfig {
    /// Display label
    #[validate(length(min = 1, message = "stage name cannot be empty"))]
    pub name: String,

    /// Script path or executable
    #[validate(length(min = 1, message = "stage command cannot be empty"))]
    pub command: String,

    /// Extra arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Report artifact locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Flat metric name -> number mapping (JSON)
    #[serde(default = "default_metrics_path")]
    pub metrics: PathBuf,

    /// Section -> key -> value mapping (YAML)
    #[serde(default = "default_params_path")]
    pub params: PathBuf,
}

fn default_metrics_path() -> PathBuf {
    PathBuf::from(DEFAULT_METRICS_PATH)
}

fn default_params_path() -> PathBuf {
    PathBuf::from(DEFAULT_PARAMS_PATH)
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            metrics: default_metrics_path(),
            params: default_params_path(),
        }
    }
}

impl Default for PipelineDefinition {
    /// The five-stage ML pipeline run with `python3`
    fn default() -> Self {
        Self {
            version: ConfigVersion::V1,
            interpreter: Some(DEFAULT_INTERPRETER.to_string()),
            stages: DEFAULT_STAGES
                .iter()
                .map(|(name, script)| StageConfig {
                    name: (*name).to_string(),
                    command: (*script).to_string(),
                    args: Vec::new(),
                })
                .collect(),
            artifacts: ArtifactPaths::default(),
        }
    }
}

impl PipelineDefinition {
    /// Resolve the configured stages into runnable specs
    ///
    /// With an interpreter, each stage becomes `<interpreter> <command> <args..>`;
    /// without one, `<command> <args..>`.
    pub fn resolve_stages(&self) -> Vec<StageSpec> {
        self.stages
            .iter()
            .map(|stage| match self.interpreter.as_deref() {
                Some(interpreter) => {
                    let mut args = Vec::with_capacity(stage.args.len() + 1);
                    args.push(stage.command.clone());
                    args.extend(stage.args.iter().cloned());
                    StageSpec {
                        name: stage.name.clone(),
                        program: interpreter.to_string(),
                        args,
                    }
                }
                None => StageSpec {
                    name: stage.name.clone(),
                    program: stage.command.clone(),
                    args: stage.args.clone(),
                },
            })
            .collect()
    }
}
