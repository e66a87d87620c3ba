//! Layered error definitions
//!
//! Categorized by source: config / stage / artifact

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Stage Errors =====
    /// The stage executable could not be launched
    #[error("failed to spawn stage '{stage}' ({program})")]
    StageSpawn {
        stage: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running stage failed
    #[error("failed to wait for stage '{stage}'")]
    StageWait {
        stage: String,
        #[source]
        source: std::io::Error,
    },

    // ===== Artifact Errors =====
    /// Artifact exists but does not have the expected shape
    #[error("artifact parse error in '{}': {message}", path.display())]
    ArtifactParse { path: PathBuf, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create stage spawn error
    pub fn stage_spawn(
        stage: impl Into<String>,
        program: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::StageSpawn {
            stage: stage.into(),
            program: program.into(),
            source,
        }
    }

    /// Create artifact parse error
    pub fn artifact_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ArtifactParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Render an error and its sources as one line, `outer: inner: root`
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(error), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
