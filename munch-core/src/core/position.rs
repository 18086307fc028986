//! 源代码位置追踪
//!
//! 坐标系统：
//! - line/column: 人类可读的错误显示（1-based）
//! - byte_offset: 文件跳转和 I/O 操作（0-based）

/// 源代码位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// 行号，1-based，用于错误显示
    pub line: usize,
    /// 列号，1-based，用于错误显示
    pub column: usize,
    /// 字节偏移，0-based，用于文件 seek
    pub byte_offset: usize,
}

impl SourcePosition {
    /// 创建新位置
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// 文件起始位置
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            byte_offset: 0,
        }
    }

    /// 前进一个字节
    ///
    /// 换行符使行号加一、列号归一，其他字节列号加一。
    pub fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.byte_offset += 1;
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

/// 源代码区间（Span）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    /// 从起始位置创建区间（结束位置相同）
    pub fn at(pos: SourcePosition) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// 合并两个位置为区间
    pub fn range(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }
}
