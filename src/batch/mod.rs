//! # 批量处理模块
//!
//! 提供统一的文件批量变换能力。
//!
//! ## 功能
//! - 收集匹配文件列表
//! - 固定大小线程池并行执行
//! - 进度反馈与统计
//!
//! ## 数据流
//! ```text
//! glob 模式 -> PathCollector -> 每个文件一个 TransformTask
//!           -> WorkerPool -> join_all -> ResultAggregator
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod pool;
pub mod runner;
pub mod summary;
pub mod task;

pub use collector::PathCollector;
pub use pool::WorkerPool;
pub use runner::BatchRunner;
pub use summary::ResultAggregator;
pub use task::{TaskOptions, TaskResult};
