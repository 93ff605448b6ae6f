//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 用法
//! - `codemod [OPTIONS] <PATTERN>`: 对匹配文件执行变换
//! - `codemod --list-transforms`: 列出内置变换
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run

pub mod run;

use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

/// codemod - 并行源码变换工具
#[derive(Parser, Debug)]
#[command(name = "codemod")]
#[command(version)]
#[command(about = "Run source-code transforms over many files in parallel", long_about = None)]
pub struct Cli {
    /// List the available transforms and exit
    #[arg(long, default_value_t = false)]
    pub list_transforms: bool,

    /// Diagnostic log level
    #[arg(long, value_enum, env = "CODEMOD_LOG", default_value = "warn")]
    pub log_level: LogLevel,

    #[command(flatten)]
    pub run: run::RunArgs,
}

/// 日志级别
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
