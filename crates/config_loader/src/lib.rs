//! # Config Loader
//!
//! Pipeline definition loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON pipeline files
//! - Validate stage lists
//! - Produce a `PipelineDefinition`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let pipeline = ConfigLoader::load_from_path(Path::new("pipeline.toml")).unwrap();
//! println!("Stages: {}", pipeline.stages.len());
//! ```

mod parser;
mod validator;

pub use contracts::PipelineDefinition;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load a pipeline from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<PipelineDefinition, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from file path, or fall back to the built-in pipeline
    pub fn load_or_default(path: Option<&Path>) -> Result<PipelineDefinition, ContractError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(PipelineDefinition::default()),
        }
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PipelineDefinition, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate an already constructed definition
    pub fn validate(pipeline: &PipelineDefinition) -> Result<(), ContractError> {
        validator::validate(pipeline)
    }

    /// Serialize PipelineDefinition to TOML string
    pub fn to_toml(pipeline: &PipelineDefinition) -> Result<String, ContractError> {
        toml::to_string_pretty(pipeline)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize PipelineDefinition to JSON string
    pub fn to_json(pipeline: &PipelineDefinition) -> Result<String, ContractError> {
        serde_json::to_string_pretty(pipeline)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PipelineDefinition, ContractError> {
        let pipeline = parser::parse(content, format)?;
        validator::validate(&pipeline)?;
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_TOML: &str = r#"
interpreter = "python3"

[[stages]]
name = "Data Ingestion"
command = "src/data_ingestion.py"

[[stages]]
name = "Model Evaluation"
command = "src/model_evaluation.py"

[artifacts]
metrics = "reports/metrics.json"
params = "params.yaml"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let pipeline = result.unwrap();
        assert_eq!(pipeline.stages[0].name, "Data Ingestion");
    }

    #[test]
    fn test_round_trip_toml() {
        let pipeline = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&pipeline).unwrap();
        let again = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(pipeline.stages, again.stages);
        assert_eq!(pipeline.interpreter, again.interpreter);
    }

    #[test]
    fn test_round_trip_json() {
        let pipeline = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&pipeline).unwrap();
        let again = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(pipeline.artifacts, again.artifacts);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[[stages]]
name = "train"
command = "train.py"

[[stages]]
name = "train"
command = "train_again.py"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_load_from_path_detects_format() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL_TOML.as_bytes()).unwrap();
        let pipeline = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(pipeline.stages.len(), 2);
    }

    #[test]
    fn test_load_from_path_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let pipeline = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(pipeline.stages.len(), 5);
        assert_eq!(pipeline.interpreter.as_deref(), Some("python3"));
    }
}
