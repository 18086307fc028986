//! munch-core - 表驱动 DFA 词法分析核心
//!
//! 设计目标：
//! - 通用：Scanner 算法只写一次，任何符合 [`Dfa`] 形状的文法表都能复用
//! - 最长匹配：只要还有转移边就继续吞入，天然实现 maximal munch
//! - 精准位置：行/列/字节偏移随消费逐字节推进，错误报告到死点位置
//! - 不可变表：转移表由 [`DfaBuilder`] 一次构建，扫描期零可变状态

pub mod automaton;
pub mod core;
pub mod expr;
pub mod scanner;

pub use automaton::{AutomatonError, Dfa, DfaBuilder, StateId, Symbol, START_STATE};
pub use core::{ByteStream, Code, SourcePosition, SourceSpan, StreamError, EOF};
pub use expr::{expr_dfa, ExprSymbol};
pub use scanner::{ScanError, Scanner, Token, Tokens};
