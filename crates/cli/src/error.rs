//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Working directory missing or not a directory
    #[error("Working directory not found: {}", path.display())]
    WorkdirNotFound { path: PathBuf },

    /// Configuration parsing or validation error
    #[error("Failed to load pipeline definition")]
    Config(#[from] contracts::ContractError),

    /// Artifact loading error
    #[error("Failed to load experiment artifacts")]
    Report(#[from] report::ReportError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn workdir_not_found(path: impl Into<PathBuf>) -> Self {
        Self::WorkdirNotFound { path: path.into() }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
