//! Munch CLI - Command line interface
//!
//! Project-based lexing - all configuration from munch.json

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

mod platform;

use crate::platform::print_error_with_source;
use munch_config::{LogLevel, OutputFormat};
use munch_core::{expr_dfa, ByteStream, ExprSymbol, Scanner, Symbol, Token};
use munch_log::{Level, LogConfig, Logger};

/// munch.json 结构
#[derive(Debug, serde::Deserialize)]
struct MunchJson {
    /// 入口文件路径
    entry: String,
    /// 词法器配置
    lexer: Option<LexerSection>,
}

/// 词法器配置
#[derive(Debug, serde::Deserialize)]
struct LexerSection {
    /// 输出格式: "plain", "json"
    output: Option<String>,
    /// 是否显示源码
    show_source: Option<bool>,
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    log_level: Option<String>,
}

#[derive(Parser)]
#[command(
    name = "munch",
    about = "Munch table-driven lexer - Project-based execution",
    version = "0.1.0"
)]
struct Cli {
    /// Configuration file path (default: ./munch.json)
    #[arg(value_name = "CONFIG", default_value = "munch.json")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let project = match read_munch_json(&cli.config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Resolve entry file path (relative to munch.json directory)
    let entry_path = resolve_entry_path(&cli.config, &project.entry);

    let source = match std::fs::read_to_string(&entry_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "Error: Cannot read entry file '{}': {}",
                entry_path.display(),
                e
            );
            process::exit(1);
        }
    };

    let lexer = project.lexer.as_ref();

    let format = lexer
        .and_then(|l| l.output.as_deref())
        .and_then(parse_output_format)
        .unwrap_or_default();
    let show_source = lexer.and_then(|l| l.show_source).unwrap_or(false);
    let log_level = lexer
        .and_then(|l| l.log_level.as_deref())
        .and_then(parse_log_level)
        .unwrap_or_default();

    let logger = build_logger(log_level);

    if show_source {
        println!("[Source]");
        for (i, line) in source.lines().enumerate() {
            println!("{:3} | {}", i + 1, line);
        }
        println!("[Tokens]");
    }

    let scanner = Scanner::with_logger(
        Arc::new(expr_dfa()),
        ByteStream::from_bytes(source.as_bytes()),
        logger,
    );

    let mut tokens = Vec::new();
    for result in scanner.tokens() {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => {
                print_error_with_source(&e, &source);
                process::exit(1);
            }
        }
    }

    match format {
        OutputFormat::Plain => print_plain(&tokens),
        OutputFormat::Json => print_json(&tokens),
    }
}

/// Read and parse munch.json
fn read_munch_json(path: &Path) -> Result<MunchJson, String> {
    if !path.exists() {
        return Err(format!(
            "未找到 '{}'\n\n当前目录不是一个 Munch 项目。\n提示: 创建 '{}' 文件并指定 'entry' 字段",
            path.display(),
            path.display()
        ));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("无法读取 '{}': {}", path.display(), e))?;

    let project: MunchJson = serde_json::from_str(&content)
        .map_err(|e| format!("解析 '{}' 失败: {}", path.display(), e))?;

    if project.entry.is_empty() {
        return Err(format!("'{}' 中的 'entry' 字段不能为空", path.display()));
    }

    Ok(project)
}

/// Resolve entry file path relative to munch.json directory
fn resolve_entry_path(config_path: &Path, entry: &str) -> PathBuf {
    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    base_dir.join(entry)
}

/// Parse output format string
fn parse_output_format(s: &str) -> Option<OutputFormat> {
    match s.to_lowercase().as_str() {
        "plain" => Some(OutputFormat::Plain),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

/// Parse log level string
fn parse_log_level(s: &str) -> Option<LogLevel> {
    match s.to_lowercase().as_str() {
        "silent" => Some(LogLevel::Silent),
        "error" => Some(LogLevel::Error),
        "warn" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" => Some(LogLevel::Trace),
        _ => None,
    }
}

/// 按配置的级别构造 stderr logger，silent 时不输出任何日志
fn build_logger(level: LogLevel) -> Arc<Logger> {
    let level = match level {
        LogLevel::Silent => return Logger::noop(),
        LogLevel::Error => Level::Error,
        LogLevel::Warn => Level::Warn,
        LogLevel::Info => Level::Info,
        LogLevel::Debug => Level::Debug,
        LogLevel::Trace => Level::Trace,
    };
    let (logger, _) = LogConfig::new(level).with_stderr().init();
    logger
}

fn symbol_name(token: &Token<ExprSymbol>) -> &'static str {
    match &token.symbol {
        Symbol::Term(k) => k.name(),
        Symbol::Eof => "eof",
        Symbol::Skip => unreachable!("skip tokens are not emitted"),
    }
}

/// 逐行输出 token（人类可读）
fn print_plain(tokens: &[Token<ExprSymbol>]) {
    for token in tokens {
        println!(
            "{}({:?}) at {}:{}",
            symbol_name(token),
            token.text(),
            token.line(),
            token.column()
        );
    }
}

/// JSON 格式输出 token 流
fn print_json(tokens: &[Token<ExprSymbol>]) {
    use serde_json::json;

    let items: Vec<serde_json::Value> = tokens
        .iter()
        .map(|t| {
            json!({
                "symbol": symbol_name(t),
                "lexeme": t.text(),
                "line": t.line(),
                "column": t.column(),
            })
        })
        .collect();

    let output = json!({ "tokens": items });
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Error: failed to serialize tokens: {}", e);
            process::exit(1);
        }
    }
}
