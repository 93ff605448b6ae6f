//! # 弃用标识符检查
//!
//! 只报告、不修改：每一行出现已弃用的标识符时产生一条警告。
//!
//! ## 依赖关系
//! - 被 `transforms/mod.rs` 注册
//! - 使用 `regex` 切分标识符

use super::rename::is_identifier;
use super::{identifier_runs, Transform, TransformOutput};
use crate::error::{CodemodError, Result};

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// 弃用检查变换
pub struct FlagDeprecated {
    identifiers: Regex,
    names: HashSet<String>,
}

impl FlagDeprecated {
    pub const NAME: &'static str = "flag-deprecated";

    pub fn new(names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Err(CodemodError::InvalidArgument(format!(
                "'{}' needs at least one --deprecated NAME",
                Self::NAME
            )));
        }

        if let Some(bad) = names.iter().find(|n| !is_identifier(n)) {
            return Err(CodemodError::InvalidArgument(format!(
                "deprecated name '{}' is not an identifier",
                bad
            )));
        }

        Ok(Self {
            identifiers: identifier_runs()?,
            names: names.iter().cloned().collect(),
        })
    }
}

impl Transform for FlagDeprecated {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, _path: &Path, source: &str) -> Result<TransformOutput> {
        let mut warnings = Vec::new();
        for (index, line) in source.lines().enumerate() {
            // 同一行重复出现只报告一次
            let mut seen: Vec<&str> = Vec::new();
            for m in self.identifiers.find_iter(line) {
                if self.names.contains(m.as_str()) && !seen.contains(&m.as_str()) {
                    seen.push(m.as_str());
                    warnings.push(format!(
                        "line {}: '{}' is deprecated",
                        index + 1,
                        m.as_str()
                    ));
                }
            }
        }

        Ok(TransformOutput {
            source: source.to_string(),
            warnings,
        })
    }
}
