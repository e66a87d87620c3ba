//! Mock stage executor
//!
//! 用于单元测试的 mock 实现，支持注入失败场景（非零退出码、无法启动）。

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

use contracts::{ContractError, OutputMode, StageExecutor, StageResult, StageSpec};
use tracing::instrument;

/// Mock 执行器配置
#[derive(Debug, Default, Clone)]
pub struct MockConfig {
    /// stage name -> 退出码（未列出的 stage 返回 0）
    pub exit_codes: HashMap<String, i32>,
    /// stage name -> 捕获的 stdout
    pub stdout: HashMap<String, String>,
    /// stage name -> 捕获的 stderr
    pub stderr: HashMap<String, String>,
    /// 模拟可执行文件不存在的 stages
    pub unlaunchable: HashSet<String>,
}

/// Mock 执行器：不启动任何进程，按配置返回结果并记录调用顺序
#[derive(Debug, Default)]
pub struct MockExecutor {
    config: MockConfig,
    /// 已调用的 (stage name, mode)，按调用顺序
    invocations: Mutex<Vec<(String, OutputMode)>>,
}

impl MockExecutor {
    /// 创建默认 mock 执行器（所有 stage 成功）
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用配置创建 mock 执行器
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// 让指定 stage 以 `exit_code` 退出
    pub fn fail_stage(mut self, stage: impl Into<String>, exit_code: i32) -> Self {
        self.config.exit_codes.insert(stage.into(), exit_code);
        self
    }

    /// 指定 stage 的 stdout
    pub fn with_stdout(mut self, stage: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.config.stdout.insert(stage.into(), stdout.into());
        self
    }

    /// 指定 stage 的 stderr
    pub fn with_stderr(mut self, stage: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.config.stderr.insert(stage.into(), stderr.into());
        self
    }

    /// 让指定 stage 无法启动
    pub fn unlaunchable(mut self, stage: impl Into<String>) -> Self {
        self.config.unlaunchable.insert(stage.into());
        self
    }

    /// 所有调用 (stage name, mode)
    pub fn invocations(&self) -> Vec<(String, OutputMode)> {
        self.invocations.lock().unwrap().clone()
    }

    /// 被调用过的 stage names，按顺序
    pub fn invoked(&self) -> Vec<String> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

impl StageExecutor for MockExecutor {
    #[instrument(name = "mock_execute", skip(self, stage), fields(stage = %stage.name, ?mode))]
    async fn execute(
        &self,
        stage: &StageSpec,
        mode: OutputMode,
    ) -> Result<StageResult, ContractError> {
        self.invocations
            .lock()
            .unwrap()
            .push((stage.name.clone(), mode));

        if self.config.unlaunchable.contains(&stage.name) {
            return Err(ContractError::stage_spawn(
                &stage.name,
                &stage.program,
                io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }

        let exit_code = self.config.exit_codes.get(&stage.name).copied().unwrap_or(0);
        Ok(match mode {
            OutputMode::Stream => StageResult::streamed(exit_code),
            OutputMode::Capture => StageResult::captured(
                exit_code,
                self.config.stdout.get(&stage.name).cloned().unwrap_or_default(),
                self.config.stderr.get(&stage.name).cloned().unwrap_or_default(),
            ),
        })
    }
}
