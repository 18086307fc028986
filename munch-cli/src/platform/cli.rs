//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use munch_core::ScanError;

/// 打印扫描错误并显示源代码上下文
pub fn print_error_with_source(e: &ScanError, source: &str) {
    eprintln!("❌ {}", e);

    if let ScanError::InvalidPattern { line, column } = e {
        print_source_context(source, *line, *column);
    }
}

/// 打印源代码上下文（显示死点所在行前后几行，并用 `^` 指向死点列）
pub fn print_source_context(source: &str, error_line: usize, error_col: usize) {
    const CONTEXT_LINES: usize = 2;

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return;
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);

    // 行号右对齐宽度
    let width = end_line.to_string().len();

    let separator = "-".repeat(width + 1);
    eprintln!("{}|--", separator);

    for line_idx in start_line..=end_line {
        let content = lines[line_idx - 1];
        eprintln!("{:>w$} | {}", line_idx, content, w = width);

        if line_idx == error_line {
            let marker = " ".repeat(error_col.saturating_sub(1));
            eprintln!("{:>w$} | {}^", "", marker, w = width);
        }
    }

    eprintln!("{}|--", separator);
}
