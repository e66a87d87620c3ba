//! # Observability
//!
//! 可观测性模块：Tracing 初始化。
//!
//! ## 功能
//!
//! - Tracing 初始化 (JSON/Pretty/Compact 格式)
//! - 支持 RUST_LOG 环境变量覆盖默认级别
//! - 日志写入 stderr，stdout 留给控制台报告
//!
//! ## 使用示例
//!
//! ```ignore
//! use observability::{ObservabilityConfig, LogFormat};
//!
//! observability::init_with_config(ObservabilityConfig {
//!     log_format: LogFormat::Compact,
//!     default_log_level: "info".into(),
//!     ..Default::default()
//! })?;
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// 日志格式
    pub log_format: LogFormat,
    /// 默认日志级别 (RUST_LOG 未设置时使用)
    pub default_log_level: String,
    /// 忽略 RUST_LOG，强制使用 default_log_level
    pub ignore_env: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            default_log_level: "warn".to_string(),
            ignore_env: false,
        }
    }
}

impl ObservabilityConfig {
    /// 根据 -v 次数 / -q 选择默认级别
    pub fn from_verbosity(verbose: u8, quiet: bool, log_format: LogFormat) -> Self {
        let (level, ignore_env) = if quiet {
            ("error", true)
        } else {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            (level, false)
        };

        Self {
            log_format,
            default_log_level: level.to_string(),
            ignore_env,
        }
    }

    fn filter(&self) -> EnvFilter {
        if self.ignore_env {
            return EnvFilter::new(&self.default_log_level);
        }
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_log_level))
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON 结构化日志
    Json,
    /// 人类可读格式
    Pretty,
    /// 紧凑单行格式
    #[default]
    Compact,
}

/// 使用自定义配置初始化
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        default_log_level = %config.default_log_level,
        "Observability initialized"
    );

    Ok(())
}
