//! # 变换列表
//!
//! 以表格形式输出内置变换。

use crate::transforms::TransformRegistry;

use tabled::{Table, Tabled};

/// 表格行
#[derive(Debug, Clone, Tabled)]
struct TransformRow {
    #[tabled(rename = "Transform")]
    name: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// 执行 `--list-transforms`
pub fn execute() {
    let rows: Vec<TransformRow> = TransformRegistry::builtin()
        .list()
        .map(|(name, description)| TransformRow { name, description })
        .collect();

    println!("{}", Table::new(&rows));
}
