//! # 变换运行参数
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use crate::batch::collector::DEFAULT_EXTENSIONS;
use crate::transforms::rename::parse_rename;
use crate::transforms::TrimTrailingWhitespace;

use clap::Args;
use std::path::PathBuf;

/// 变换运行参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Glob pattern (or directory) selecting the files to transform
    #[arg(required_unless_present = "list_transforms")]
    pub pattern: Option<String>,

    /// Transform to apply; repeat to run several in order
    #[arg(
        short,
        long = "transform",
        env = "CODEMOD_TRANSFORM",
        value_delimiter = ',',
        default_value = TrimTrailingWhitespace::NAME
    )]
    pub transforms: Vec<String>,

    /// Identifier rename for 'rename-identifiers' (e.g., 'Hidden=HiddenVisually')
    #[arg(long = "rename", value_name = "OLD=NEW", value_parser = parse_rename)]
    pub renames: Vec<(String, String)>,

    /// Identifier reported by 'flag-deprecated'
    #[arg(long, value_name = "NAME")]
    pub deprecated: Vec<String>,

    /// Number of parallel workers (0 = number of CPUs)
    #[arg(short, long, env = "CODEMOD_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Run every file on a single worker
    #[arg(long, default_value_t = false)]
    pub run_in_band: bool,

    /// Report changes without writing files
    #[arg(long, default_value_t = false)]
    pub dry: bool,

    /// File extensions accepted when the pattern is a directory (comma-separated)
    #[arg(long, default_value = DEFAULT_EXTENSIONS)]
    pub extensions: String,

    /// Extra glob pattern to exclude; may be repeated
    #[arg(long, value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub silent: bool,

    /// Print a per-file status table before the summary
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Write per-file results to a CSV file
    #[arg(long, value_name = "CSV")]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    /// 实际使用的工作线程数（0 表示 CPU 核数）
    pub fn worker_count(&self) -> usize {
        if self.run_in_band {
            1
        } else {
            self.jobs
        }
    }
}
