//! `stages` command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use contracts::StageSpec;
use serde::Serialize;
use tracing::info;

use crate::cli::{PipelineArgs, StagesArgs};
use crate::context::PipelineContext;

/// Stage listing for JSON output
#[derive(Serialize)]
struct StagesInfo {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    interpreter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workdir: Option<PathBuf>,
    stages: Vec<StageSpec>,
    artifacts: ArtifactsInfo,
}

#[derive(Serialize)]
struct ArtifactsInfo {
    metrics: PathBuf,
    params: PathBuf,
}

/// Execute the `stages` command
pub fn run_stages(pipeline: &PipelineArgs, args: &StagesArgs) -> Result<ExitCode> {
    let context = PipelineContext::resolve(pipeline)?;
    let stages = context.stages();
    info!(source = %context.source(), stages = stages.len(), "Listing stages");

    if args.json {
        let info = StagesInfo {
            source: context.source(),
            interpreter: context.definition.interpreter.clone(),
            workdir: context.workdir.clone(),
            artifacts: ArtifactsInfo {
                metrics: context.metrics_path(None),
                params: context.params_path(None),
            },
            stages,
        };
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize stage list")?;
        println!("{}", json);
    } else {
        print_stage_list(&context, &stages);
    }

    Ok(ExitCode::SUCCESS)
}

/// Tree view of the resolved stages
pub(crate) fn print_stage_list(context: &PipelineContext, stages: &[StageSpec]) {
    println!("\n📋 Pipeline ({})", context.source());
    if let Some(dir) = &context.workdir {
        println!("   ├─ Working dir: {}", dir.display());
    }
    println!(
        "   ├─ Interpreter: {}",
        context.definition.interpreter.as_deref().unwrap_or("(none)")
    );
    println!("   └─ Stages ({}):", stages.len());
    for (i, stage) in stages.iter().enumerate() {
        let prefix = if i == stages.len() - 1 { "└─" } else { "├─" };
        println!(
            "        {} {}. {} → {}",
            prefix,
            i + 1,
            stage.name,
            stage.command_line()
        );
    }

    println!("\n📤 Artifacts");
    println!("   ├─ Metrics: {}", context.metrics_path(None).display());
    println!("   └─ Params: {}", context.params_path(None).display());
    println!();
}
