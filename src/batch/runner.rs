//! # 批量执行器
//!
//! 为每个文件提交一个变换任务，等待全部结算后交给汇总器。
//!
//! ## 功能
//! - 每个文件一个 `TransformTask`，提交到 `WorkerPool`
//! - 协调线程只在 `join_all` 处等待
//! - 每个 Job 结算时推进进度，单文件错误立即输出到 stderr
//! - 结束后关闭线程池
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `batch/pool.rs`, `batch/task.rs`, `utils/progress.rs`

use super::pool::{join_all, WorkerPool};
use super::task::{TaskOptions, TaskResult, TransformTask};
use crate::error::{error_chain, CodemodError};
use crate::transforms::Transform;
use crate::utils::output;
use crate::utils::progress::ProgressReporter;

use std::path::PathBuf;
use std::sync::Arc;

/// 批量执行器
pub struct BatchRunner {
    pool: WorkerPool,
    options: TaskOptions,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(pool: WorkerPool, options: TaskOptions) -> Self {
        Self { pool, options }
    }

    /// 并行处理文件列表，返回值与 `files` 顺序一致
    pub fn run(
        self,
        files: Vec<PathBuf>,
        transform: Arc<dyn Transform>,
        reporter: &ProgressReporter,
    ) -> Vec<TaskResult> {
        log::info!(
            "Running '{}' on {} files with {} workers",
            transform.name(),
            files.len(),
            self.pool.workers()
        );

        let jobs: Vec<_> = files
            .iter()
            .map(|path| {
                let task = TransformTask::new(path.clone(), Arc::clone(&transform), self.options);
                self.pool.submit(move || task.run())
            })
            .collect();

        let outcomes = join_all(jobs, |index, outcome| {
            reporter.increment();

            let failure = match outcome {
                Ok(result) if result.failed => result.warnings.first().cloned(),
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };
            if let Some(message) = failure {
                reporter.suspend(|| {
                    output::print_error(&format!("{}: {}", files[index].display(), message));
                });
            }
        });

        self.pool.shutdown();

        files
            .into_iter()
            .zip(outcomes)
            .map(|(path, outcome)| {
                outcome.unwrap_or_else(|e| {
                    let err = CodemodError::from(e);
                    log::debug!("{}: {}", path.display(), error_chain(&err));
                    TaskResult::from_error(path, &err)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::transforms::TransformOutput;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// 文件内容为 "panic" 时崩溃，为 "warn" 时报告警告，否则转为大写
    struct Upper;

    impl Transform for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn apply(&self, _path: &Path, source: &str) -> Result<TransformOutput> {
            match source {
                "panic" => panic!("bad input"),
                "warn" => Ok(TransformOutput {
                    source: source.to_string(),
                    warnings: vec!["deprecated API".to_string()],
                }),
                _ => Ok(TransformOutput {
                    source: source.to_uppercase(),
                    warnings: Vec::new(),
                }),
            }
        }
    }

    fn fixture(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
        let dir = TempDir::new().unwrap();
        let paths = files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect();
        (dir, paths)
    }

    fn runner(workers: usize) -> BatchRunner {
        BatchRunner::new(WorkerPool::new(workers).unwrap(), TaskOptions::default())
    }

    #[test]
    fn test_every_file_settles_once() {
        let (_dir, paths) = fixture(&[
            ("a.js", "a"),
            ("b.js", "warn"),
            ("c.js", "panic"),
            ("d.js", "D"),
        ]);
        let reporter = ProgressReporter::new(paths.len(), true);
        let results = runner(2).run(paths.clone(), Arc::new(Upper), &reporter);

        assert_eq!(reporter.processed(), 4);
        assert_eq!(
            results.iter().map(|r| r.filepath.clone()).collect::<Vec<_>>(),
            paths
        );

        assert!(results[0].updated);
        assert_eq!(results[1].warnings, vec!["deprecated API".to_string()]);
        assert!(results[2].failed);
        assert_eq!(results[2].warnings, vec!["Worker crashed: bad input".to_string()]);
        assert!(!results[3].updated);
    }

    #[test]
    fn test_second_run_is_up_to_date() {
        let (_dir, paths) = fixture(&[("a.js", "a"), ("b.js", "b")]);

        let reporter = ProgressReporter::new(paths.len(), true);
        let first = runner(2).run(paths.clone(), Arc::new(Upper), &reporter);
        assert!(first.iter().all(|r| r.updated));

        let reporter = ProgressReporter::new(paths.len(), true);
        let second = runner(2).run(paths, Arc::new(Upper), &reporter);
        assert!(second.iter().all(|r| !r.updated && r.warnings.is_empty()));
    }

    #[test]
    fn test_empty_file_list() {
        let reporter = ProgressReporter::new(0, true);
        let results = runner(1).run(Vec::new(), Arc::new(Upper), &reporter);
        assert!(results.is_empty());
        assert_eq!(reporter.processed(), 0);
    }
}
