//! # 中断处理
//!
//! 在后台线程上等待 Ctrl+C，收到后通知 `ProgressReporter`。
//! 已分发的任务不会被取消，线程池照常排空。
//! 再次按下 Ctrl+C 时立即以 130 退出。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `tokio::signal`

use crate::utils::progress::ProgressReporter;

use std::process;
use std::thread;

/// 中断退出码（128 + SIGINT）
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// 安装中断监听
///
/// 监听线程在进程退出前一直存在；安装失败只记录日志，不影响运行。
pub fn install_interrupt_handler(reporter: ProgressReporter) {
    let spawned = thread::Builder::new()
        .name("codemod-signal".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::warn!("Interrupt handler unavailable: {}", e);
                    return;
                }
            };

            loop {
                if let Err(e) = runtime.block_on(tokio::signal::ctrl_c()) {
                    log::warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                if on_ctrl_c(&reporter) {
                    process::exit(INTERRUPT_EXIT_CODE);
                }
            }
        });

    if let Err(e) = spawned {
        log::warn!("Failed to spawn interrupt handler: {}", e);
    }
}

/// 处理一次 Ctrl+C；返回 true 表示应立即退出
fn on_ctrl_c(reporter: &ProgressReporter) -> bool {
    if reporter.is_interrupted() {
        log::warn!("Received Ctrl+C again, exiting without waiting");
        return true;
    }
    log::info!("Received Ctrl+C, waiting for running tasks to finish");
    reporter.interrupt();
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_ctrl_c_forces_exit() {
        let reporter = ProgressReporter::new(1, true);

        assert!(!on_ctrl_c(&reporter));
        assert!(reporter.is_interrupted());
        assert!(on_ctrl_c(&reporter));
        assert!(on_ctrl_c(&reporter));
    }
}
