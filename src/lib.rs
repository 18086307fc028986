//! Munch - A table-driven lexical analyzer
//!
//! Munch separates the lexing algorithm from the lexical grammar:
//! the grammar lives in an immutable transition table, and a single
//! maximal-munch scanner drives any table you hand it.
//!
//! # Architecture
//!
//! ```text
//! munch-core/    - byte stream, automaton, scanner, builtin grammar
//! munch-config/  - shared configuration vocabulary
//! munch-log/     - lightweight logging (sinks, ring buffer, macros)
//! munch-cli/     - munch.json driven command line tool
//! ```
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use munch::{expr_dfa, ByteStream, Scanner};
//!
//! let scanner = Scanner::new(Arc::new(expr_dfa()), ByteStream::from_bytes(b"1+2"));
//! let tokens: Result<Vec<_>, _> = scanner.tokens().collect();
//! assert_eq!(tokens.unwrap().len(), 4); // int, plus, int, eof
//! ```

// 重导出常用类型
pub use munch_core::{
    expr_dfa, AutomatonError, ByteStream, Code, Dfa, DfaBuilder, ExprSymbol, ScanError, Scanner,
    SourcePosition, SourceSpan, StateId, StreamError, Symbol, Token, Tokens, EOF, START_STATE,
};

pub use munch_config::{LogLevel, OutputFormat};
pub use munch_log::{Level, LogConfig, LogRingBuffer, Logger};
