//! 配置校验模块
//!
//! 校验规则：
//! - 至少一个 stage
//! - stage name / command 非空
//! - stage name 唯一
//! - interpreter (若设置) 非空

use std::collections::HashSet;

use contracts::{ContractError, PipelineDefinition};
use ::validator::Validate;

/// 校验 PipelineDefinition 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(pipeline: &PipelineDefinition) -> Result<(), ContractError> {
    pipeline
        .validate()
        .map_err(|e| ContractError::config_validation("stages", e.to_string()))?;
    validate_stage_fields(pipeline)?;
    validate_stage_names(pipeline)?;
    validate_interpreter(pipeline)?;
    Ok(())
}

/// 校验每个 stage 的字段
fn validate_stage_fields(pipeline: &PipelineDefinition) -> Result<(), ContractError> {
    for (idx, stage) in pipeline.stages.iter().enumerate() {
        stage
            .validate()
            .map_err(|e| ContractError::config_validation(format!("stages[{idx}]"), e.to_string()))?;
    }
    Ok(())
}

/// 校验 stage name 唯一性
fn validate_stage_names(pipeline: &PipelineDefinition) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for stage in &pipeline.stages {
        if !seen.insert(stage.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("stages[name={}]", stage.name),
                "duplicate stage name",
            ));
        }
    }
    Ok(())
}

/// 校验 interpreter
fn validate_interpreter(pipeline: &PipelineDefinition) -> Result<(), ContractError> {
    match pipeline.interpreter.as_deref() {
        Some(interpreter) if interpreter.trim().is_empty() => Err(
            ContractError::config_validation("interpreter", "interpreter cannot be blank"),
        ),
        _ => Ok(()),
    }
}
