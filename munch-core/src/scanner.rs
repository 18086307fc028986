//! 扫描器：最长匹配驱动循环
//!
//! 算法只有一个：沿表走到不能再走。只要当前状态对预读码还有
//! 转移边就消费并前进；无边时停在最后到达的状态——是终态就
//! 产出 token，否则在死点位置报 `Invalid pattern`。
//!
//! 预读码留在 [`ByteStream`] 的缓冲里跨 token 边界携带，
//! 词法层自身不需要任何回退。

use std::io::Read;
use std::sync::Arc;

use munch_log::{debug, trace, warn, Logger};

use crate::automaton::{Dfa, Symbol};
use crate::core::{ByteStream, SourcePosition, SourceSpan, StreamError};

/// 词法单元
#[derive(Debug, Clone, PartialEq)]
pub struct Token<K> {
    /// 符号种类
    pub symbol: Symbol<K>,
    /// 原始字节序列（EOF token 为空）
    pub lexeme: Vec<u8>,
    /// 源区间
    pub span: SourceSpan,
}

impl<K> Token<K> {
    /// 词素的文本形式（非 UTF-8 字节以替换字符呈现）
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.lexeme).into_owned()
    }

    /// token 起始行号
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// token 起始列号
    pub fn column(&self) -> usize {
        self.span.start.column
    }
}

/// 扫描错误
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 停在非终态：死点位置上没有任何文法模式能继续
    #[error("Invalid pattern at {line}:{column}")]
    InvalidPattern { line: usize, column: usize },

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// 扫描器
///
/// 持有共享的文法表和独占的输入流。表是只读的，
/// 多个扫描器实例可以共享同一张 [`Dfa`]。
pub struct Scanner<K, R> {
    dfa: Arc<Dfa<K>>,
    stream: ByteStream<R>,
    logger: Arc<Logger>,
}

impl<K: Clone + std::fmt::Debug, R: Read> Scanner<K, R> {
    pub fn new(dfa: Arc<Dfa<K>>, stream: ByteStream<R>) -> Self {
        Self::with_logger(dfa, stream, Logger::noop())
    }

    pub fn with_logger(dfa: Arc<Dfa<K>>, stream: ByteStream<R>, logger: Arc<Logger>) -> Self {
        trace!(
            logger,
            "scanner created with {} automaton states",
            dfa.state_count()
        );
        Self {
            dfa,
            stream,
            logger,
        }
    }

    /// 当前流位置
    pub fn position(&self) -> SourcePosition {
        self.stream.position()
    }

    /// 产出下一个 token
    ///
    /// Skip 符号在内部循环消化，调用方只会看到实 token 和 EOF。
    /// 输入耗尽后每次调用都返回 EOF token。
    pub fn next_token(&mut self) -> Result<Token<K>, ScanError> {
        loop {
            let start = self.stream.position();
            let mut state = self.dfa.start_state();
            let mut lexeme = Vec::new();

            // 最长匹配：有边就走，无边即停
            loop {
                let code = self.stream.peek()?;
                match self.dfa.next(state, code) {
                    Some(next) => {
                        state = next;
                        self.stream.advance()?;
                        if let Ok(byte) = u8::try_from(code) {
                            lexeme.push(byte);
                        }
                    }
                    None => break,
                }
            }

            if !self.dfa.is_final(state) {
                let pos = self.stream.position();
                warn!(
                    self.logger,
                    "no pattern matches at {}:{}", pos.line, pos.column
                );
                return Err(ScanError::InvalidPattern {
                    line: pos.line,
                    column: pos.column,
                });
            }

            match self.dfa.symbol(state) {
                Symbol::Skip => {
                    trace!(
                        self.logger,
                        "skipped {} bytes at {}:{}",
                        lexeme.len(),
                        start.line,
                        start.column
                    );
                    continue;
                }
                symbol => {
                    let token = Token {
                        symbol: symbol.clone(),
                        lexeme,
                        span: SourceSpan::range(start, self.stream.position()),
                    };
                    debug!(
                        self.logger,
                        "token {:?} {:?} at {}:{}",
                        token.symbol,
                        token.text(),
                        token.line(),
                        token.column()
                    );
                    return Ok(token);
                }
            }
        }
    }

    /// 转为 token 迭代器（消费扫描器）
    pub fn tokens(self) -> Tokens<K, R> {
        Tokens {
            scanner: self,
            done: false,
        }
    }
}

/// token 迭代器
///
/// 产出到 EOF token（含）为止；首个错误后熔断。
pub struct Tokens<K, R> {
    scanner: Scanner<K, R>,
    done: bool,
}

impl<K: Clone + std::fmt::Debug, R: Read> Iterator for Tokens<K, R> {
    type Item = Result<Token<K>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next_token() {
            Ok(token) => {
                if matches!(token.symbol, Symbol::Eof) {
                    self.done = true;
                }
                Some(Ok(token))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
