//! `validate` command implementation.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::{PipelineArgs, ValidateArgs};
use crate::context::PipelineContext;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PipelineSummary>,
}

#[derive(Serialize)]
struct PipelineSummary {
    version: String,
    stage_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    interpreter: Option<String>,
}

/// Execute the `validate` command
pub fn run_validate(pipeline: &PipelineArgs, args: &ValidateArgs) -> Result<ExitCode> {
    let config_path = pipeline
        .config
        .as_deref()
        .map_or_else(|| "<built-in>".to_string(), |p| p.display().to_string());
    info!(config = %config_path, "Validating pipeline definition");

    let result = validate_pipeline(pipeline, config_path);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn validate_pipeline(pipeline: &PipelineArgs, config_path: String) -> ValidationResult {
    match PipelineContext::resolve(pipeline) {
        Ok(context) => {
            let warnings = collect_warnings(&context);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(PipelineSummary {
                    version: format!("{:?}", context.definition.version),
                    stage_count: context.definition.stages.len(),
                    interpreter: context.definition.interpreter.clone(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(contracts::error_chain(&e)),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect non-fatal issues
fn collect_warnings(context: &PipelineContext) -> Vec<String> {
    let mut warnings = Vec::new();
    let interpreted = context.definition.interpreter.is_some();

    for stage in &context.definition.stages {
        // Bare program names are looked up on PATH, only check things that look like paths.
        let command = Path::new(&stage.command);
        let is_path = interpreted || command.components().count() > 1;
        if is_path && !context.resolve_path(command).exists() {
            warnings.push(format!(
                "Stage '{}': '{}' not found under {}",
                stage.name,
                stage.command,
                context
                    .workdir
                    .as_deref()
                    .map_or_else(|| "the current directory".to_string(), |d| d.display().to_string())
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Pipeline definition is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Stages: {}", summary.stage_count);
            println!(
                "  Interpreter: {}",
                summary.interpreter.as_deref().unwrap_or("(none)")
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Pipeline definition is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
