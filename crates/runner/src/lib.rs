//! # Runner
//!
//! Fail-fast sequential stage execution.
//!
//! 负责：
//! - 按顺序启动 stage 子进程（同一时刻只有一个）
//! - 第一个非零退出码即终止后续 stage
//! - 通过 `StageReporter` 向调用方报告进度
//!
//! ## 使用示例
//!
//! ```ignore
//! use contracts::{OutputMode, PipelineDefinition};
//! use runner::{ProcessExecutor, StageRunner};
//!
//! let stages = PipelineDefinition::default().resolve_stages();
//! let runner = StageRunner::new(ProcessExecutor::new(), OutputMode::Stream);
//!
//! let summary = runner.run(&stages, &mut ()).await;
//! if let Some(failure) = summary.failure {
//!     std::process::exit(failure.process_exit_code().into());
//! }
//! ```

mod mock;
mod process;
mod reporter;
mod sequencer;

pub use mock::{MockConfig, MockExecutor};
pub use process::{exit_code_of, ProcessExecutor};
pub use reporter::StageReporter;
pub use sequencer::StageRunner;

// Re-export contracts types
pub use contracts::{
    CompletedStage, OutputMode, RunSummary, StageExecutor, StageFailure, StageResult, StageSpec,
};
