//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! ## 输出约定
//! - 标准输出：警告块与最终摘要行（见 `batch/summary.rs`）
//! - 标准错误：单文件错误、致命错误
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `batch/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[*]".blue().bold(), msg);
}
