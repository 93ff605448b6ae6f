//! # 工具函数模块
//!
//! 提供美化输出、进度条、日志、中断处理与报告导出等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/` 模块使用
//! - 子模块: logging, output, progress, report, signal

pub mod logging;
pub mod output;
pub mod progress;
pub mod report;
pub mod signal;
