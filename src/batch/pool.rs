//! # 工作线程池
//!
//! 固定大小的并行执行单元，每个提交的任务返回一个 `Job` 句柄。
//!
//! ## 功能
//! - `submit` 立即返回，不阻塞调用方
//! - 任务 panic 时只有对应 Job 以 `WorkerCrash` 结算，线程继续服务其他任务
//! - `shutdown` 后尚未开始的任务以 `PoolTerminated` 结算
//! - `join_all` 是唯一的等待点：按完成顺序回调，按提交顺序返回结果
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `rayon` 线程池，`crossbeam-channel` 传递结果

use crate::error::{CodemodError, JobError, Result};

use crossbeam_channel::{bounded, Receiver, Select};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Job 结算结果
pub type JobOutcome<T> = std::result::Result<T, JobError>;

/// 已提交任务的句柄
pub struct Job<T> {
    rx: Receiver<JobOutcome<T>>,
}

#[cfg(test)]
impl<T> Job<T> {
    /// 阻塞直到该任务结算
    pub fn wait(self) -> JobOutcome<T> {
        // 发送端未发送即被丢弃，说明任务随线程池一起被丢弃
        self.rx.recv().unwrap_or(Err(JobError::PoolTerminated))
    }
}

/// 工作线程池
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    terminated: Arc<AtomicBool>,
    workers: usize,
}

impl WorkerPool {
    /// 创建线程池；`workers` 为 0 时使用 CPU 逻辑核数
    pub fn new(workers: usize) -> Result<Self> {
        let workers = if workers == 0 { num_cpus::get() } else { workers };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("codemod-worker-{}", i))
            .build()
            .map_err(|e| CodemodError::Other(format!("Failed to start worker pool: {}", e)))?;

        log::debug!("Started worker pool with {} workers", workers);

        Ok(Self {
            pool,
            terminated: Arc::new(AtomicBool::new(false)),
            workers,
        })
    }

    /// 工作线程数
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 提交任务，立即返回 Job
    pub fn submit<T, F>(&self, task: F) -> Job<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let terminated = Arc::clone(&self.terminated);

        self.pool.spawn(move || {
            let outcome = if terminated.load(Ordering::Acquire) {
                Err(JobError::PoolTerminated)
            } else {
                panic::catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
                    JobError::WorkerCrash {
                        message: panic_message(payload.as_ref()),
                    }
                })
            };
            // 接收方已放弃等待时忽略
            let _ = tx.send(outcome);
        });

        Job { rx }
    }

    /// 关闭线程池；尚未开始的任务以 `PoolTerminated` 结算
    pub fn shutdown(&self) {
        if !self.terminated.swap(true, Ordering::AcqRel) {
            log::debug!("Worker pool shut down");
        }
    }

    #[cfg(test)]
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// 等待所有 Job 结算
///
/// `on_settled(index, outcome)` 在调用线程上按完成顺序调用，
/// 返回值按提交顺序排列。
pub fn join_all<T, F>(jobs: Vec<Job<T>>, mut on_settled: F) -> Vec<JobOutcome<T>>
where
    F: FnMut(usize, &JobOutcome<T>),
{
    let mut outcomes: Vec<Option<JobOutcome<T>>> = jobs.iter().map(|_| None).collect();

    {
        let mut select = Select::new();
        for job in &jobs {
            select.recv(&job.rx);
        }

        for _ in 0..jobs.len() {
            let oper = select.select();
            let index = oper.index();
            let outcome = oper
                .recv(&jobs[index].rx)
                .unwrap_or(Err(JobError::PoolTerminated));
            select.remove(index);

            on_settled(index, &outcome);
            outcomes[index] = Some(outcome);
        }
    }

    outcomes
        .into_iter()
        .map(|o| o.unwrap_or(Err(JobError::PoolTerminated)))
        .collect()
}

/// 从 panic 负载中提取消息
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_submit_and_wait() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(pool.workers(), 2);

        let job = pool.submit(|| 21 * 2);
        assert_eq!(job.wait(), Ok(42));
    }

    #[test]
    fn test_zero_workers_uses_cpu_count() {
        let pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.workers(), num_cpus::get());
    }

    #[test]
    fn test_crash_is_isolated() {
        let pool = WorkerPool::new(1).unwrap();
        let jobs = vec![
            pool.submit(|| 1),
            pool.submit(|| -> i32 { panic!("transform exploded") }),
            pool.submit(|| 3),
        ];
        let outcomes = join_all(jobs, |_, _| {});

        assert_eq!(outcomes[0], Ok(1));
        assert_eq!(
            outcomes[1],
            Err(JobError::WorkerCrash {
                message: "transform exploded".to_string()
            })
        );
        // 同一个工作线程仍可继续处理
        assert_eq!(outcomes[2], Ok(3));
    }

    #[test]
    fn test_join_all_reports_every_job_once() {
        let pool = WorkerPool::new(4).unwrap();
        let jobs: Vec<_> = (0..50).map(|i| pool.submit(move || i)).collect();

        let mut seen = Vec::new();
        let outcomes = join_all(jobs, |index, outcome| {
            assert_eq!(outcome, &Ok(index));
            seen.push(index);
        });

        seen.sort();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
        assert_eq!(outcomes, (0..50).map(Ok).collect::<Vec<_>>());
    }

    #[test]
    fn test_shutdown_terminates_pending_jobs() {
        let pool = WorkerPool::new(1).unwrap();
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        // 第一个任务占住唯一的工作线程
        let running = pool.submit(move || {
            started_tx.send(()).unwrap();
            release_rx.recv_timeout(Duration::from_secs(5)).ok();
            "done"
        });
        let pending = pool.submit(|| "never");

        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        pool.shutdown();
        assert!(pool.is_terminated());
        release_tx.send(()).unwrap();

        assert_eq!(running.wait(), Ok("done"));
        assert_eq!(pending.wait(), Err(JobError::PoolTerminated));
    }
}
