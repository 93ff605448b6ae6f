//! # 行尾空白清理

use super::{Transform, TransformOutput};
use crate::error::Result;

use std::path::Path;

/// 删除每行末尾的空格与制表符，保留原有换行符（`\n` 或 `\r\n`）
pub struct TrimTrailingWhitespace;

impl TrimTrailingWhitespace {
    pub const NAME: &'static str = "trim-trailing-whitespace";
}

impl Transform for TrimTrailingWhitespace {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, _path: &Path, source: &str) -> Result<TransformOutput> {
        let mut output = String::with_capacity(source.len());
        for line in source.split_inclusive('\n') {
            let (body, ending) = match line.strip_suffix("\r\n") {
                Some(body) => (body, "\r\n"),
                None => match line.strip_suffix('\n') {
                    Some(body) => (body, "\n"),
                    None => (line, ""),
                },
            };
            output.push_str(body.trim_end_matches([' ', '\t']));
            output.push_str(ending);
        }

        Ok(TransformOutput {
            source: output,
            warnings: Vec::new(),
        })
    }
}
