//! # 结果报告导出
//!
//! 将每个文件的处理结果写入 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `csv` 与 `serde` 写入

use crate::batch::TaskResult;
use crate::error::{CodemodError, Result};

use serde::Serialize;
use std::path::Path;

/// 报告中的一行
#[derive(Debug, Serialize)]
struct ReportRow {
    path: String,
    status: &'static str,
    updated: bool,
    warning_count: usize,
    warnings: String,
}

impl From<&TaskResult> for ReportRow {
    fn from(result: &TaskResult) -> Self {
        Self {
            path: result.filepath.display().to_string(),
            status: status_label(result),
            updated: result.updated,
            warning_count: result.warnings.len(),
            warnings: result.warnings.join("; "),
        }
    }
}

/// 状态标签
pub fn status_label(result: &TaskResult) -> &'static str {
    if result.failed {
        "failed"
    } else if result.has_warnings() {
        "warning"
    } else if result.updated {
        "updated"
    } else {
        "unchanged"
    }
}

/// 保存结果到 CSV
pub fn write_csv(results: &[TaskResult], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(CodemodError::CsvError)?;

    for result in results {
        wtr.serialize(ReportRow::from(result))
            .map_err(CodemodError::CsvError)?;
    }

    wtr.flush().map_err(|e| CodemodError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("report.csv");
        let results = vec![
            TaskResult {
                filepath: PathBuf::from("a.js"),
                updated: true,
                warnings: Vec::new(),
                failed: false,
            },
            TaskResult {
                filepath: PathBuf::from("b.js"),
                updated: false,
                warnings: vec!["line 1: 'Box' is deprecated".to_string(), "x".to_string()],
                failed: false,
            },
        ];

        write_csv(&results, &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "path,status,updated,warning_count,warnings");
        assert_eq!(lines[1], "a.js,updated,true,0,");
        assert_eq!(lines[2], "b.js,warning,false,2,line 1: 'Box' is deprecated; x");
    }

    #[test]
    fn test_status_label() {
        let result = TaskResult {
            filepath: PathBuf::from("a.js"),
            updated: false,
            warnings: vec!["Failed to read file: a.js".to_string()],
            failed: true,
        };
        assert_eq!(status_label(&result), "failed");
    }
}
