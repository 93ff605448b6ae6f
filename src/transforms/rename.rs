//! # 标识符重命名
//!
//! 按 `OLD=NEW` 对整词替换标识符，例如组件改名 `Box` -> `Stack`。
//! 所有规则一次扫描完成，替换结果不会再被其他规则匹配。
//!
//! ## 依赖关系
//! - 被 `transforms/mod.rs` 注册
//! - 使用 `regex` 切分标识符

use super::{identifier_runs, Transform, TransformOutput};
use crate::error::{CodemodError, Result};

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

/// 整词重命名变换
pub struct RenameIdentifiers {
    identifiers: Regex,
    renames: HashMap<String, String>,
}

impl RenameIdentifiers {
    pub const NAME: &'static str = "rename-identifiers";

    /// 由 (旧名, 新名) 列表构建；同一旧名出现多次时以最后一条为准
    pub fn new(renames: &[(String, String)]) -> Result<Self> {
        if renames.is_empty() {
            return Err(CodemodError::InvalidArgument(format!(
                "'{}' needs at least one --rename OLD=NEW",
                Self::NAME
            )));
        }

        let mut map = HashMap::with_capacity(renames.len());
        for (from, to) in renames {
            if !is_identifier(from) || !is_identifier(to) {
                return Err(CodemodError::InvalidArgument(format!(
                    "rename '{}={}' must map one identifier to another",
                    from, to
                )));
            }
            if from != to {
                map.insert(from.clone(), to.clone());
            }
        }

        Ok(Self {
            identifiers: identifier_runs()?,
            renames: map,
        })
    }
}

impl Transform for RenameIdentifiers {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, _path: &Path, source: &str) -> Result<TransformOutput> {
        let output = self
            .identifiers
            .replace_all(source, |caps: &Captures| {
                let word = &caps[0];
                self.renames
                    .get(word)
                    .cloned()
                    .unwrap_or_else(|| word.to_string())
            })
            .into_owned();

        Ok(TransformOutput {
            source: output,
            warnings: Vec::new(),
        })
    }
}

/// 解析 `OLD=NEW` 形式的参数
pub fn parse_rename(s: &str) -> std::result::Result<(String, String), String> {
    let (from, to) = s
        .split_once('=')
        .ok_or_else(|| format!("expected OLD=NEW, got '{}'", s))?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(format!("expected OLD=NEW, got '{}'", s));
    }
    Ok((from.to_string(), to.to_string()))
}

/// JS 标识符（ASCII 子集）
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
