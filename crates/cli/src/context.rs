//! Pipeline resolution shared by all commands.

use std::path::{Path, PathBuf};

use config_loader::ConfigLoader;
use contracts::{PipelineDefinition, StageSpec};
use runner::ProcessExecutor;
use tracing::info;

use crate::cli::PipelineArgs;
use crate::error::{CliError, Result};

/// A pipeline definition plus the CLI overrides that apply to it
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub definition: PipelineDefinition,

    /// Config file the definition came from (None = built-in)
    pub config_path: Option<PathBuf>,

    /// Directory stages run in (None = current directory)
    pub workdir: Option<PathBuf>,
}

impl PipelineContext {
    /// Load the definition and apply overrides
    pub fn resolve(args: &PipelineArgs) -> Result<Self> {
        if let Some(dir) = &args.workdir {
            if !dir.is_dir() {
                return Err(CliError::workdir_not_found(dir));
            }
        }

        if let Some(path) = &args.config {
            if !path.exists() {
                return Err(CliError::config_not_found(path));
            }
        }

        let mut definition = ConfigLoader::load_or_default(args.config.as_deref())?;

        if let Some(interpreter) = &args.interpreter {
            info!(interpreter = %interpreter, "Overriding interpreter from CLI");
            definition.interpreter = Some(interpreter.clone());
            ConfigLoader::validate(&definition)?;
        }

        let context = Self {
            definition,
            config_path: args.config.clone(),
            workdir: args.workdir.clone(),
        };

        info!(
            source = %context.source(),
            stages = context.definition.stages.len(),
            interpreter = ?context.definition.interpreter,
            "Pipeline definition resolved"
        );

        Ok(context)
    }

    /// Where the definition came from, for display
    pub fn source(&self) -> String {
        self.config_path
            .as_deref()
            .map_or_else(|| "<built-in>".to_string(), |p| p.display().to_string())
    }

    pub fn stages(&self) -> Vec<StageSpec> {
        self.definition.resolve_stages()
    }

    pub fn executor(&self) -> ProcessExecutor {
        match &self.workdir {
            Some(dir) => ProcessExecutor::with_working_dir(dir),
            None => ProcessExecutor::new(),
        }
    }

    /// Resolve a relative path against the working directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.workdir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Metrics artifact location, `override_path` taking precedence
    pub fn metrics_path(&self, override_path: Option<&Path>) -> PathBuf {
        self.resolve_path(override_path.unwrap_or(self.definition.artifacts.metrics.as_path()))
    }

    /// Parameters artifact location, `override_path` taking precedence
    pub fn params_path(&self, override_path: Option<&Path>) -> PathBuf {
        self.resolve_path(override_path.unwrap_or(self.definition.artifacts.params.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_built_in() {
        let ctx = PipelineContext::resolve(&PipelineArgs::default()).unwrap();
        assert_eq!(ctx.source(), "<built-in>");
        assert_eq!(ctx.stages().len(), 5);
        assert_eq!(ctx.metrics_path(None), PathBuf::from("reports/metrics.json"));
    }

    #[test]
    fn test_interpreter_override() {
        let args = PipelineArgs {
            interpreter: Some("/opt/venv/bin/python".into()),
            ..Default::default()
        };
        let ctx = PipelineContext::resolve(&args).unwrap();
        assert!(ctx
            .stages()
            .iter()
            .all(|s| s.program == "/opt/venv/bin/python"));
    }

    #[test]
    fn test_blank_interpreter_override_is_rejected() {
        let args = PipelineArgs {
            interpreter: Some(" ".into()),
            ..Default::default()
        };
        assert!(matches!(
            PipelineContext::resolve(&args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let args = PipelineArgs {
            config: Some("does/not/exist.toml".into()),
            ..Default::default()
        };
        assert!(matches!(
            PipelineContext::resolve(&args),
            Err(CliError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_workdir() {
        let args = PipelineArgs {
            workdir: Some("does/not/exist".into()),
            ..Default::default()
        };
        assert!(matches!(
            PipelineContext::resolve(&args),
            Err(CliError::WorkdirNotFound { .. })
        ));
    }

    #[test]
    fn test_artifact_paths_resolve_against_workdir() {
        let dir = tempfile::tempdir().unwrap();
        let args = PipelineArgs {
            workdir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let ctx = PipelineContext::resolve(&args).unwrap();

        assert_eq!(
            ctx.params_path(None),
            dir.path().join("params.yaml")
        );
        assert_eq!(
            ctx.metrics_path(Some(Path::new("/abs/metrics.json"))),
            PathBuf::from("/abs/metrics.json")
        );
    }

    #[test]
    fn test_malformed_config_cause_printed_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "stages = [[[\n").unwrap();
        let args = PipelineArgs {
            config: Some(path),
            ..Default::default()
        };

        let err = anyhow::Error::from(PipelineContext::resolve(&args).unwrap_err());
        let message = format!("{err:#}");
        let root = err.root_cause().to_string();

        assert!(message.starts_with("Failed to load pipeline definition: config parse error: invalid TOML: "));
        assert_eq!(message.matches("config parse error").count(), 1);
        assert_eq!(message.matches(root.as_str()).count(), 1);
    }
}
