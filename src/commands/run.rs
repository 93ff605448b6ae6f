//! # 变换运行实现
//!
//! 协调一次完整的批量变换。
//!
//! ## 流程
//! 1. 展开模式得到文件列表（模式非法时直接失败）
//! 2. 按名称构建变换
//! 3. 创建线程池、进度条与中断监听
//! 4. 每个文件提交一个任务并等待全部结算
//! 5. 汇总输出警告与摘要，可选导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `batch/`, `transforms/`, `utils/`

use super::RunOutcome;
use crate::batch::{BatchRunner, PathCollector, ResultAggregator, TaskOptions, TaskResult, WorkerPool};
use crate::cli::run::RunArgs;
use crate::error::{CodemodError, Result};
use crate::transforms::{TransformConfig, TransformRegistry};
use crate::utils::progress::ProgressReporter;
use crate::utils::{output, report, signal};

use tabled::{Table, Tabled};

/// 详细模式下的表格行
#[derive(Debug, Clone, Tabled)]
struct StatusRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Warnings")]
    warnings: usize,
}

/// 执行变换运行
pub fn execute(args: RunArgs) -> Result<RunOutcome> {
    let pattern = args
        .pattern
        .clone()
        .ok_or_else(|| CodemodError::InvalidArgument("a file pattern is required".to_string()))?;

    // 运行前检查：模式与变换都必须有效
    let files = PathCollector::new(pattern.as_str())
        .with_extensions(&args.extensions)
        .with_ignore(&args.ignore)
        .collect()?;

    let config = TransformConfig {
        renames: args.renames.clone(),
        deprecated: args.deprecated.clone(),
    };
    let transform = TransformRegistry::builtin().build(&args.transforms, &config)?;

    if files.is_empty() {
        return Err(CodemodError::NoFilesFound { pattern });
    }

    if !args.silent {
        output::print_info(&format!(
            "Applying '{}' to {} files{}",
            transform.name(),
            files.len(),
            if args.dry { " (dry run)" } else { "" }
        ));
    }

    let pool = WorkerPool::new(args.worker_count())?;
    let reporter = ProgressReporter::new(files.len(), args.silent);
    signal::install_interrupt_handler(reporter.clone());

    let runner = BatchRunner::new(pool, TaskOptions { dry_run: args.dry });
    let results = runner.run(files, transform, &reporter);
    reporter.finish();

    debug_assert_eq!(reporter.processed(), reporter.total());

    if args.verbose {
        print_status_table(&results);
    }

    if let Some(path) = &args.report {
        report::write_csv(&results, path)?;
        output::print_info(&format!("Report written to '{}'", path.display()));
    }

    let aggregator = ResultAggregator::new(results, args.dry);
    aggregator.print()?;

    let summary = aggregator.summary();
    log::info!(
        "{} files, {} updated, {} with warnings, {} failed",
        summary.total,
        summary.updated,
        summary.files_with_warnings,
        summary.failed
    );

    Ok(if reporter.is_interrupted() {
        RunOutcome::Interrupted
    } else if summary.has_warnings() {
        RunOutcome::Warnings
    } else {
        RunOutcome::Clean
    })
}

fn print_status_table(results: &[TaskResult]) {
    let rows: Vec<StatusRow> = results
        .iter()
        .map(|r| StatusRow {
            file: r.filepath.display().to_string(),
            status: report::status_label(r),
            warnings: r.warnings.len(),
        })
        .collect();
    println!("{}", Table::new(&rows));
}
