//! 平台层：命令行输出格式化

mod cli;

pub use cli::{print_error_with_source, print_source_context};
