//! # 文件收集器
//!
//! 将 glob 模式展开为待处理的文件列表。
//!
//! ## 功能
//! - glob 模式匹配（`src/**/*.tsx`）
//! - 目录输入时递归遍历，并按扩展名过滤
//! - 始终排除依赖目录 `node_modules` 与类型声明文件（`.d.ts` 等）
//! - 通配符不匹配以 `.` 开头的文件与目录
//! - 额外的 `--ignore` 排除模式
//! - 结果排序去重，对同一文件系统快照结果确定
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `glob` 展开模式，`walkdir` 遍历目录

use crate::error::{CodemodError, Result};

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 依赖目录名
const DEPENDENCY_DIR: &str = "node_modules";

/// 类型声明文件后缀
const DECLARATION_SUFFIXES: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];

/// 目录输入时的默认扩展名
pub const DEFAULT_EXTENSIONS: &str = "js,jsx,ts,tsx";

/// 文件收集器
pub struct PathCollector {
    /// glob 模式或目录
    pattern: String,
    /// 目录输入时接受的扩展名
    extensions: Vec<String>,
    /// 额外排除模式
    ignore: Vec<String>,
}

impl PathCollector {
    /// 创建新的文件收集器
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            extensions: split_extensions(DEFAULT_EXTENSIONS),
            ignore: Vec::new(),
        }
    }

    /// 设置扩展名（逗号分隔）
    pub fn with_extensions(mut self, extensions: &str) -> Self {
        let parsed = split_extensions(extensions);
        if !parsed.is_empty() {
            self.extensions = parsed;
        }
        self
    }

    /// 设置额外排除模式
    pub fn with_ignore(mut self, ignore: &[String]) -> Self {
        self.ignore = ignore.to_vec();
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let ignore = self
            .ignore
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        let root = Path::new(&self.pattern);
        let candidates = if root.is_dir() {
            log::debug!("Walking directory '{}'", root.display());
            self.walk(root)
        } else {
            self.expand()?
        };

        let mut paths: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|p| !is_excluded(p))
            .filter(|p| !ignore.iter().any(|pat| pat.matches_path_with(p, match_options())))
            .collect();

        paths.sort();
        paths.dedup();

        log::debug!("Collected {} files from '{}'", paths.len(), self.pattern);
        Ok(paths)
    }

    /// 展开 glob 模式
    fn expand(&self) -> Result<Vec<PathBuf>> {
        let entries =
            glob::glob_with(&self.pattern, match_options()).map_err(|e| CodemodError::PatternError {
                pattern: self.pattern.clone(),
                reason: e.msg.to_string(),
            })?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable path: {}", e),
            }
        }
        Ok(paths)
    }

    /// 递归遍历目录，不进入依赖目录与隐藏目录
    fn walk(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || (e.file_name() != DEPENDENCY_DIR
                        && !e.file_name().to_string_lossy().starts_with('.'))
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches_extension(e.path()))
            .map(|e| e.into_path())
            .collect()
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// 是否位于依赖目录或为类型声明文件
pub fn is_excluded(path: &Path) -> bool {
    if path
        .components()
        .any(|c| c.as_os_str() == DEPENDENCY_DIR)
    {
        return true;
    }

    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| DECLARATION_SUFFIXES.iter().any(|s| name.ends_with(s)))
        .unwrap_or(false)
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| CodemodError::PatternError {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

fn split_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "src/a.js");
        touch(root, "src/b.tsx");
        touch(root, "src/types.d.ts");
        touch(root, "src/nested/c.ts");
        touch(root, "src/readme.md");
        touch(root, "node_modules/dep/index.js");
        touch(root, "src/node_modules/dep/index.js");
        touch(root, "src/.cache/x.js");
        touch(root, ".eslintrc.js");
        dir
    }

    fn rel(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        paths
            .into_iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_glob_excludes_dependencies_and_declarations() {
        let dir = fixture();
        let pattern = format!("{}/**/*", dir.path().display());
        let files = PathCollector::new(pattern).collect().unwrap();
        assert_eq!(
            rel(dir.path(), files),
            vec!["src/a.js", "src/b.tsx", "src/nested/c.ts", "src/readme.md"]
        );
    }

    #[test]
    fn test_directory_filters_by_extension() {
        let dir = fixture();
        let files = PathCollector::new(dir.path().display().to_string())
            .with_extensions("js, .ts")
            .collect()
            .unwrap();
        assert_eq!(rel(dir.path(), files), vec!["src/a.js", "src/nested/c.ts"]);
    }

    #[test]
    fn test_ignore_patterns() {
        let dir = fixture();
        let pattern = format!("{}/src/**/*.*s*", dir.path().display());
        let ignore = vec![format!("{}/src/nested/**", dir.path().display())];
        let files = PathCollector::new(pattern)
            .with_ignore(&ignore)
            .collect()
            .unwrap();
        assert_eq!(rel(dir.path(), files), vec!["src/a.js", "src/b.tsx"]);
    }

    #[test]
    fn test_hidden_paths_skipped() {
        let dir = fixture();
        let pattern = format!("{}/**/*.js", dir.path().display());
        let files = PathCollector::new(pattern).collect().unwrap();
        assert_eq!(rel(dir.path(), files), vec!["src/a.js"]);

        let files = PathCollector::new(dir.path().display().to_string())
            .with_extensions("js")
            .collect()
            .unwrap();
        assert_eq!(rel(dir.path(), files), vec!["src/a.js"]);

        // 显式写出的点号仍可匹配
        let pattern = format!("{}/src/.cache/*.js", dir.path().display());
        let files = PathCollector::new(pattern).collect().unwrap();
        assert_eq!(rel(dir.path(), files), vec!["src/.cache/x.js"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = PathCollector::new("src/***/x.js").collect().unwrap_err();
        assert!(matches!(err, CodemodError::PatternError { .. }));

        let err = PathCollector::new("*.js")
            .with_ignore(&["[".to_string()])
            .collect()
            .unwrap_err();
        assert!(matches!(err, CodemodError::PatternError { .. }));
    }

    #[test]
    fn test_is_excluded() {
        assert!(is_excluded(Path::new("node_modules/x/a.js")));
        assert!(is_excluded(Path::new("lib/index.d.ts")));
        assert!(is_excluded(Path::new("lib/index.d.mts")));
        assert!(!is_excluded(Path::new("lib/index.ts")));
        assert!(!is_excluded(Path::new("lib/node_modules_helper.js")));
    }
}
