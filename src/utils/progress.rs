//! # 进度显示
//!
//! 封装 `indicatif` 提供统一的进度条样式，以及批量运行用的 `ProgressReporter`。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 与 `utils/signal.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// 创建标准进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// 批量运行进度
///
/// 可在多个线程间克隆共享；计数与绘制都是线程安全的。
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    total: usize,
    processed: Arc<AtomicUsize>,
    interrupted: Arc<AtomicBool>,
}

impl ProgressReporter {
    /// `hidden` 为 true 时只计数不绘制
    pub fn new(total: usize, hidden: bool) -> Self {
        let bar = create_progress_bar(total as u64, "Transforming");
        if hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self {
            bar,
            total,
            processed: Arc::new(AtomicUsize::new(0)),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 每个结算的 Job 调用一次，无论成功与否
    pub fn increment(&self) {
        self.processed.fetch_add(1, Ordering::AcqRel);
        self.bar.inc(1);
    }

    /// 已处理数量
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 收到中断：停止绘制并标记本次运行失败，已分发的任务继续执行
    pub fn interrupt(&self) {
        if !self.interrupted.swap(true, Ordering::AcqRel) {
            self.bar.abandon_with_message("Interrupted");
            self.bar.set_draw_target(ProgressDrawTarget::hidden());
        }
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }

    /// 暂时隐藏进度条以输出其他内容
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// 结束并清除进度条
    pub fn finish(&self) {
        if !self.is_interrupted() {
            self.bar.finish_and_clear();
        }
    }
}
