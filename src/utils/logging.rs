//! # 日志初始化
//!
//! 使用 `simplelog` 将 `log` 宏输出到标准错误。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// 初始化终端日志；重复初始化时静默忽略
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Debug)
        .set_target_level(LevelFilter::Off)
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).ok();
}
