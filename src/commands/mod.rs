//! # 命令执行模块
//!
//! 实现变换运行与变换列表的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `transforms/`, `utils/`
//! - 子模块: list, run

pub mod list;
pub mod run;

use crate::cli::Cli;
use crate::error::Result;
use crate::utils::signal::INTERRUPT_EXIT_CODE;

/// 运行结果，决定进程退出码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 无警告
    Clean,
    /// 至少一个文件产生警告
    Warnings,
    /// 运行中收到中断
    Interrupted,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Clean => 0,
            RunOutcome::Warnings => 1,
            RunOutcome::Interrupted => INTERRUPT_EXIT_CODE,
        }
    }
}

/// 执行命令
pub fn run(cli: Cli) -> Result<RunOutcome> {
    if cli.list_transforms {
        list::execute();
        return Ok(RunOutcome::Clean);
    }
    run::execute(cli.run)
}
