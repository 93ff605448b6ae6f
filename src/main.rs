//! # codemod - 并行源码变换工具
//!
//! 将 glob 模式展开为文件列表，在固定大小的线程池上对每个文件执行
//! 指定的变换，显示进度，最后输出各文件的警告与一行摘要。
//!
//! ## 退出码
//! - `0` - 完成且无警告
//! - `1` - 有警告，或运行前错误（模式非法、未知变换等）
//! - `130` - 运行中被中断
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/      (收集、线程池、任务、汇总)
//!   │     └── transforms/ (变换实现与注册表)
//!   ├── utils/      (输出、进度、日志、中断、报告)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod transforms;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.log_level.into());

    match commands::run(cli) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            utils::output::print_error(&format!("{}", e));
            std::process::exit(1);
        }
    }
}
