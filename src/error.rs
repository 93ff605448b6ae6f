//! # 统一错误处理模块
//!
//! 定义 codemod 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分层
//! - 运行前错误（模式非法、未知变换、参数错误）是致命的，进程以非零退出
//! - 单文件错误（读写失败、变换失败）在任务内恢复为警告，运行继续
//! - 作业错误（`JobError`）由线程池投递给对应的 Job
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// codemod 统一错误类型
#[derive(Error, Debug)]
pub enum CodemodError {
    // ─────────────────────────────────────────────────────────────
    // 模式错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    PatternError { pattern: String, reason: String },

    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 变换与作业错误
    // ─────────────────────────────────────────────────────────────
    #[error("Transform '{transform}' failed: {reason}")]
    TransformError { transform: String, reason: String },

    #[error("Unknown transform '{name}' (available: {available})")]
    UnknownTransform { name: String, available: String },

    #[error("Worker pool was shut down before the task ran")]
    PoolTerminated,

    #[error("Worker crashed: {message}")]
    WorkerCrash { message: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CodemodError>;

/// Job 结算失败的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Worker pool was shut down before the task ran")]
    PoolTerminated,

    #[error("Worker crashed: {message}")]
    WorkerCrash { message: String },
}

impl From<JobError> for CodemodError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::PoolTerminated => CodemodError::PoolTerminated,
            JobError::WorkerCrash { message } => CodemodError::WorkerCrash { message },
        }
    }
}

/// 将错误及其来源链拼接为一行，便于作为警告输出
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
