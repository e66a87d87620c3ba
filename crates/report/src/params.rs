//! Parameters artifact: section -> key -> value mapping.

use std::fmt;
use std::path::Path;

use contracts::ContractError;
use serde_yaml::Value;

use crate::{read_artifact, Result};

/// One top-level entry of the parameters file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSection {
    /// `section: {key: value, ...}`, keys in file order
    Table(Vec<(String, String)>),
    /// A top-level key whose value is not a mapping
    Scalar(String),
}

/// Parameters in file order, values already rendered as display text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersRecord {
    sections: Vec<(String, ParamSection)>,
}

impl ParametersRecord {
    /// Load from `path`; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        read_artifact(path)?
            .map(|content| Self::parse(&content, path))
            .transpose()
    }

    /// Parse YAML content; `origin` is only used in error messages
    ///
    /// An empty document yields an empty record.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)
            .map_err(|e| ContractError::artifact_parse(origin, format!("invalid YAML: {e}")))?;

        let mapping = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(ContractError::artifact_parse(
                    origin,
                    format!("expected a mapping of sections, found {}", kind(&other)),
                )
                .into())
            }
        };

        let sections = mapping
            .into_iter()
            .map(|(section, value)| {
                let body = match value {
                    Value::Mapping(table) => ParamSection::Table(
                        table
                            .into_iter()
                            .map(|(key, value)| (render_value(&key), render_value(&value)))
                            .collect(),
                    ),
                    other => ParamSection::Scalar(render_value(&other)),
                };
                (render_value(&section), body)
            })
            .collect();

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[(String, ParamSection)] {
        &self.sections
    }

    /// Look up `section.key`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .and_then(|(_, body)| match body {
                ParamSection::Table(entries) => entries
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.as_str()),
                ParamSection::Scalar(_) => None,
            })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Section header at two spaces, keys at four
impl fmt::Display for ParametersRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (section, body) in &self.sections {
            match body {
                ParamSection::Table(entries) => {
                    writeln!(f, "  {section}:")?;
                    for (key, value) in entries {
                        writeln!(f, "    {key}: {value}")?;
                    }
                }
                ParamSection::Scalar(value) => writeln!(f, "  {section}: {value}")?,
            }
        }
        Ok(())
    }
}

/// Render a YAML value as flat display text
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let items: Vec<_> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(mapping) => {
            let pairs: Vec<_> = mapping
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
        Value::Tagged(tagged) => render_value(&tagged.value),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportError;

    fn origin() -> &'static Path {
        Path::new("params.yaml")
    }

    #[test]
    fn test_renders_sections_and_keys() {
        let yaml = "train:\n  epochs: 10\n  lr: 0.01\n";
        let record = ParametersRecord::parse(yaml, origin()).unwrap();

        assert_eq!(record.to_string(), "  train:\n    epochs: 10\n    lr: 0.01\n");
    }

    #[test]
    fn test_accepts_json_shaped_document() {
        let record =
            ParametersRecord::parse(r#"{"train": {"epochs": 10, "lr": 0.01}}"#, origin()).unwrap();
        assert_eq!(record.get("train", "epochs"), Some("10"));
        assert_eq!(record.get("train", "lr"), Some("0.01"));
    }

    #[test]
    fn test_preserves_section_and_key_order() {
        let yaml = "\
data_ingestion:
  test_size: 0.2
feature_engineering:
  max_features: 50
model_building:
  n_estimators: 25
  random_state: 2
";
        let record = ParametersRecord::parse(yaml, origin()).unwrap();
        let names: Vec<_> = record.sections().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["data_ingestion", "feature_engineering", "model_building"]
        );
        assert!(record
            .to_string()
            .ends_with("  model_building:\n    n_estimators: 25\n    random_state: 2\n"));
    }

    #[test]
    fn test_nested_and_sequence_values_render_inline() {
        let yaml = "model:\n  layers: [64, 32]\n  optimizer: {name: adam, beta: 0.9}\n  tag: baseline\n";
        let record = ParametersRecord::parse(yaml, origin()).unwrap();

        assert_eq!(record.get("model", "layers"), Some("[64, 32]"));
        assert_eq!(record.get("model", "optimizer"), Some("{name: adam, beta: 0.9}"));
        assert_eq!(record.get("model", "tag"), Some("baseline"));
    }

    #[test]
    fn test_scalar_section_renders_on_one_line() {
        let record = ParametersRecord::parse("seed: 42\n", origin()).unwrap();
        assert_eq!(record.to_string(), "  seed: 42\n");
    }

    #[test]
    fn test_empty_document_is_empty_record() {
        let record = ParametersRecord::parse("", origin()).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.to_string(), "");
    }

    #[test]
    fn test_top_level_sequence_is_error() {
        let err = ParametersRecord::parse("- a\n- b\n", origin()).unwrap_err();
        assert!(err.to_string().contains("expected a mapping"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let err = ParametersRecord::parse("train: [unclosed", origin()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::Contract(ContractError::ArtifactParse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ParametersRecord::load(&dir.path().join("params.yaml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_bool_and_null_render_as_yaml() {
        let yaml = "train:\n  shuffle: true\n  early_stop: false\n  scheduler: null\n  extra: ~\n";
        let record = ParametersRecord::parse(yaml, origin()).unwrap();

        assert_eq!(
            record.to_string(),
            "  train:\n    shuffle: true\n    early_stop: false\n    scheduler: null\n    extra: null\n"
        );
    }
}
