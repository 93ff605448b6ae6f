//! # 变换模块
//!
//! 定义源码变换接口与内置变换注册表。
//!
//! ## 功能
//! - `Transform` trait：对单个文件内容做纯函数变换，返回新内容与警告
//! - `Pipeline`：按顺序组合多个变换
//! - `TransformRegistry`：按名称查找内置变换
//!
//! ## 内置变换
//! - `rename-identifiers` - 整词重命名标识符
//! - `flag-deprecated` - 标记已弃用的标识符（只报告，不修改）
//! - `trim-trailing-whitespace` - 删除行尾空白
//!
//! ## 依赖关系
//! - 被 `batch/task.rs` 调用
//! - 被 `commands/run.rs` 用于构建变换
//! - 子模块: deprecated, rename, whitespace

pub mod deprecated;
pub mod rename;
pub mod whitespace;

pub use deprecated::FlagDeprecated;
pub use rename::RenameIdentifiers;
pub use whitespace::TrimTrailingWhitespace;

use crate::error::{CodemodError, Result};

use regex::Regex;
use std::path::Path;
use std::sync::Arc;

/// 匹配连续的标识符字符；`$` 与字母数字同属标识符，整段比较才能做到整词匹配
pub(crate) fn identifier_runs() -> Result<Regex> {
    Regex::new(r"[A-Za-z0-9_$]+").map_err(|e| CodemodError::Other(e.to_string()))
}

/// 单次变换的输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// 变换后的内容
    pub source: String,
    /// 非致命问题
    pub warnings: Vec<String>,
}

impl TransformOutput {
    /// 内容不变、无警告
    pub fn unchanged(source: &str) -> Self {
        Self {
            source: source.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// 源码变换
///
/// 实现必须是纯函数且幂等：对已变换过的内容再次调用不应再产生修改。
pub trait Transform: Send + Sync {
    /// 注册名
    fn name(&self) -> &str;

    /// 变换单个文件的内容
    fn apply(&self, path: &Path, source: &str) -> Result<TransformOutput>;
}

/// 按顺序执行多个变换，警告依次拼接
pub struct Pipeline {
    name: String,
    stages: Vec<Arc<dyn Transform>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Arc<dyn Transform>>) -> Self {
        let name = stages
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join("+");
        Self { name, stages }
    }
}

impl Transform for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, path: &Path, source: &str) -> Result<TransformOutput> {
        let mut output = TransformOutput::unchanged(source);
        for stage in &self.stages {
            let next = stage.apply(path, &output.source)?;
            output.source = next.source;
            output.warnings.extend(next.warnings);
        }
        Ok(output)
    }
}

/// 内置变换所需的参数
#[derive(Debug, Clone, Default)]
pub struct TransformConfig {
    /// `rename-identifiers` 的 (旧名, 新名) 列表
    pub renames: Vec<(String, String)>,
    /// `flag-deprecated` 的标识符列表
    pub deprecated: Vec<String>,
}

type Factory = fn(&TransformConfig) -> Result<Arc<dyn Transform>>;

/// 注册表条目
struct Entry {
    name: &'static str,
    description: &'static str,
    factory: Factory,
}

/// 内置变换注册表
pub struct TransformRegistry {
    entries: Vec<Entry>,
}

impl TransformRegistry {
    /// 包含全部内置变换的注册表
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                Entry {
                    name: RenameIdentifiers::NAME,
                    description: "Rename whole-word identifiers (--rename OLD=NEW)",
                    factory: |config| Ok(Arc::new(RenameIdentifiers::new(&config.renames)?)),
                },
                Entry {
                    name: FlagDeprecated::NAME,
                    description: "Warn on lines using deprecated identifiers (--deprecated NAME)",
                    factory: |config| Ok(Arc::new(FlagDeprecated::new(&config.deprecated)?)),
                },
                Entry {
                    name: TrimTrailingWhitespace::NAME,
                    description: "Strip trailing spaces and tabs from every line",
                    factory: |_| Ok(Arc::new(TrimTrailingWhitespace)),
                },
            ],
        }
    }

    /// 所有注册的 (名称, 描述)
    pub fn list(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|e| (e.name, e.description))
    }

    /// 按名称构建单个变换
    pub fn resolve(&self, name: &str, config: &TransformConfig) -> Result<Arc<dyn Transform>> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| CodemodError::UnknownTransform {
                name: name.to_string(),
                available: self
                    .entries
                    .iter()
                    .map(|e| e.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        (entry.factory)(config)
    }

    /// 按名称构建变换；多个名称组合为流水线
    pub fn build(&self, names: &[String], config: &TransformConfig) -> Result<Arc<dyn Transform>> {
        if names.is_empty() {
            return Err(CodemodError::InvalidArgument(
                "at least one transform is required".to_string(),
            ));
        }

        let mut stages = names
            .iter()
            .map(|name| self.resolve(name, config))
            .collect::<Result<Vec<_>>>()?;

        if stages.len() == 1 {
            Ok(stages.remove(0))
        } else {
            Ok(Arc::new(Pipeline::new(stages)))
        }
    }
}
