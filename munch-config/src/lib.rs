//! Munch Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all munch crates.

use serde::Deserialize;

/// 日志级别（配置文件词汇，与 munch-log 的 Level 解耦）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 只输出错误（silent 的别名）
    Silent,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Warn
    }
}

/// Token 输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name("lexeme")` 文本输出
    Plain,
    /// JSON 数组输出
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Plain
    }
}
