//! # 变换任务
//!
//! 每个文件一个任务：读取、变换、必要时写回，并报告结果。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 创建，提交到 `batch/pool.rs`
//! - 使用 `transforms/` 中的 `Transform`

use crate::error::{error_chain, CodemodError, Result};
use crate::transforms::Transform;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// 文件路径
    pub filepath: PathBuf,
    /// 内容是否被修改
    pub updated: bool,
    /// 非致命问题
    pub warnings: Vec<String>,
    /// 是否由恢复的单文件错误产生
    pub failed: bool,
}

impl TaskResult {
    /// 由单文件错误恢复得到的结果
    pub fn from_error(filepath: PathBuf, err: &CodemodError) -> Self {
        Self {
            filepath,
            updated: false,
            warnings: vec![error_chain(err)],
            failed: true,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// 任务选项
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskOptions {
    /// 试运行：不写回文件
    pub dry_run: bool,
}

/// 变换任务
pub struct TransformTask {
    path: PathBuf,
    transform: Arc<dyn Transform>,
    options: TaskOptions,
}

impl TransformTask {
    pub fn new(path: PathBuf, transform: Arc<dyn Transform>, options: TaskOptions) -> Self {
        Self {
            path,
            transform,
            options,
        }
    }

    /// 执行任务；任何内部错误都被降级为该文件的警告
    pub fn run(self) -> TaskResult {
        match self.try_run() {
            Ok((updated, warnings)) => TaskResult {
                filepath: self.path,
                updated,
                warnings,
                failed: false,
            },
            Err(e) => {
                log::debug!("Task for '{}' failed: {}", self.path.display(), e);
                TaskResult::from_error(self.path, &e)
            }
        }
    }

    fn try_run(&self) -> Result<(bool, Vec<String>)> {
        let source = fs::read_to_string(&self.path).map_err(|e| CodemodError::FileReadError {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let output = self
            .transform
            .apply(&self.path, &source)
            .map_err(|e| match e {
                err @ CodemodError::TransformError { .. } => err,
                other => CodemodError::TransformError {
                    transform: self.transform.name().to_string(),
                    reason: error_chain(&other),
                },
            })?;

        let updated = output.source != source;
        if updated && !self.options.dry_run {
            fs::write(&self.path, &output.source).map_err(|e| CodemodError::FileWriteError {
                path: self.path.display().to_string(),
                source: e,
            })?;
        }

        Ok((updated, output.warnings))
    }
}
