//! # 结果汇总
//!
//! 所有 Job 结算后，输出带警告的文件及其警告，最后输出唯一一行摘要。
//!
//! ## 摘要优先级
//! 1. 任一文件有警告：`Completed with N warning(s) (see above).`
//! 2. 否则有文件被修改：`Updated N file(s).`
//! 3. 否则：`You're up to date!`
//!
//! 警告数按整次运行统计，而不是单个文件。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `colored` 着色（非终端时自动关闭）

use super::task::TaskResult;
use crate::error::{CodemodError, Result};

use colored::Colorize;
use std::io::{self, Write};

/// 本次运行的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 总文件数
    pub total: usize,
    /// 被修改的文件数
    pub updated: usize,
    /// 有警告的文件数
    pub files_with_warnings: usize,
    /// 全部文件的警告总数
    pub warnings: usize,
    /// 恢复的单文件错误数
    pub failed: usize,
}

impl RunSummary {
    pub fn has_warnings(&self) -> bool {
        self.warnings > 0
    }
}

/// 结果汇总器
pub struct ResultAggregator {
    results: Vec<TaskResult>,
    dry_run: bool,
}

impl ResultAggregator {
    pub fn new(results: Vec<TaskResult>, dry_run: bool) -> Self {
        Self { results, dry_run }
    }

    /// 计算统计
    pub fn summary(&self) -> RunSummary {
        self.results
            .iter()
            .fold(RunSummary::default(), |mut summary, result| {
                summary.total += 1;
                if result.updated {
                    summary.updated += 1;
                }
                if result.has_warnings() {
                    summary.files_with_warnings += 1;
                    summary.warnings += result.warnings.len();
                }
                if result.failed {
                    summary.failed += 1;
                }
                summary
            })
    }

    /// 带警告的文件
    pub fn warning_blocks(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| r.has_warnings())
    }

    /// 唯一的摘要行
    pub fn summary_line(&self) -> String {
        let summary = self.summary();
        if summary.has_warnings() {
            format!(
                "Completed with {} (see above).",
                pluralize(summary.warnings, "warning")
            )
        } else if summary.updated > 0 {
            if self.dry_run {
                format!(
                    "{} would be updated (dry run).",
                    pluralize(summary.updated, "file")
                )
            } else {
                format!("Updated {}.", pluralize(summary.updated, "file"))
            }
        } else {
            "You're up to date!".to_string()
        }
    }

    /// 写出警告块与摘要行：路径一行，每条警告缩进一行，最后一行为摘要
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for result in self.warning_blocks() {
            writeln!(out, "{}", result.filepath.display().to_string().bold())?;
            for warning in &result.warnings {
                writeln!(out, "  {}", warning.yellow())?;
            }
        }

        let line = self.summary_line();
        if self.summary().has_warnings() {
            writeln!(out, "{}", line.yellow().bold())
        } else {
            writeln!(out, "{}", line.green().bold())
        }
    }

    /// 输出到标准输出
    pub fn print(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock)
            .and_then(|_| lock.flush())
            .map_err(|e| CodemodError::Other(format!("Failed to write summary: {}", e)))
    }
}

/// 计数为 1 时单数，否则加 `s`
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rendered(aggregator: &ResultAggregator) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        aggregator.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn result(path: &str, updated: bool, warnings: &[&str]) -> TaskResult {
        TaskResult {
            filepath: PathBuf::from(path),
            updated,
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
            failed: false,
        }
    }

    #[test]
    fn test_warning_scenario() {
        let aggregator = ResultAggregator::new(
            vec![
                result("a.js", true, &[]),
                result("b.js", false, &["deprecated API"]),
            ],
            false,
        );
        assert_eq!(
            rendered(&aggregator),
            "b.js\n  deprecated API\nCompleted with 1 warning (see above).\n"
        );
    }

    #[test]
    fn test_up_to_date_scenario() {
        let aggregator = ResultAggregator::new(
            vec![result("a.js", false, &[]), result("b.js", false, &[])],
            false,
        );
        assert_eq!(rendered(&aggregator), "You're up to date!\n");
        assert_eq!(aggregator.warning_blocks().count(), 0);
    }

    #[test]
    fn test_updated_line() {
        let results = vec![result("a.js", true, &[]), result("b.js", true, &[])];
        assert_eq!(
            ResultAggregator::new(results.clone(), false).summary_line(),
            "Updated 2 files."
        );
        assert_eq!(
            ResultAggregator::new(results, true).summary_line(),
            "2 files would be updated (dry run)."
        );
        assert_eq!(
            ResultAggregator::new(vec![result("a.js", true, &[])], false).summary_line(),
            "Updated 1 file."
        );
    }

    #[test]
    fn test_warning_count_spans_all_files() {
        let aggregator = ResultAggregator::new(
            vec![
                result("a.js", true, &["one", "two"]),
                result("b.js", false, &["three"]),
                result("c.js", true, &[]),
            ],
            false,
        );
        let summary = aggregator.summary();
        assert_eq!(summary.warnings, 3);
        assert_eq!(summary.files_with_warnings, 2);
        assert_eq!(summary.updated, 2);
        assert_eq!(summary.total, 3);
        // 有警告时优先于修改数
        assert_eq!(
            aggregator.summary_line(),
            "Completed with 3 warnings (see above)."
        );
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "file"), "0 files");
        assert_eq!(pluralize(1, "file"), "1 file");
        assert_eq!(pluralize(2, "warning"), "2 warnings");
    }
}
