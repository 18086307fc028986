//! 内建表达式文法
//!
//! 词法词汇表：十进制整数、`#` 前缀十六进制、标识符（字母打头、
//! 数字只能出现在尾段）、算术与位运算单字符操作符、括号。
//! 空白作为 Skip 符号消化，EOF 是文法表里一条普通的边。

use crate::automaton::{AutomatonError, Dfa, DfaBuilder, Symbol, START_STATE};
use crate::core::EOF;

/// 表达式文法的词法种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprSymbol {
    Int,
    Hex,
    Variable,
    Plus,
    Minus,
    Times,
    Divide,
    BitAnd,
    BitOr,
    LParen,
    RParen,
}

impl ExprSymbol {
    /// 稳定的外部名字（输出和测试断言使用）
    pub fn name(&self) -> &'static str {
        match self {
            ExprSymbol::Int => "int",
            ExprSymbol::Hex => "hex",
            ExprSymbol::Variable => "variable",
            ExprSymbol::Plus => "plus",
            ExprSymbol::Minus => "minus",
            ExprSymbol::Times => "times",
            ExprSymbol::Divide => "divide",
            ExprSymbol::BitAnd => "bwand",
            ExprSymbol::BitOr => "bwor",
            ExprSymbol::LParen => "lparen",
            ExprSymbol::RParen => "rparen",
        }
    }
}

fn build() -> Result<Dfa<ExprSymbol>, AutomatonError> {
    let mut b = DfaBuilder::new();

    let int = b.add_state();
    let hash = b.add_state();
    let hex = b.add_state();
    let var = b.add_state();
    let var_num = b.add_state();
    let ws = b.add_state();
    let eof = b.add_state();

    // 整数：数字自环
    b.transition_range(START_STATE, '0'..='9', int)?;
    b.transition_range(int, '0'..='9', int)?;
    b.mark_final(int, Symbol::Term(ExprSymbol::Int))?;

    // 十六进制：'#' 后至少一个十六进制数字
    b.transition_char(START_STATE, '#', hash)?;
    for range in ['0'..='9', 'a'..='f', 'A'..='F'] {
        b.transition_range(hash, range.clone(), hex)?;
        b.transition_range(hex, range, hex)?;
    }
    b.mark_final(hex, Symbol::Term(ExprSymbol::Hex))?;

    // 标识符：字母段后可接数字尾段，数字后不再接受字母
    b.transition_range(START_STATE, 'a'..='z', var)?;
    b.transition_range(START_STATE, 'A'..='Z', var)?;
    b.transition_range(var, 'a'..='z', var)?;
    b.transition_range(var, 'A'..='Z', var)?;
    b.transition_range(var, '0'..='9', var_num)?;
    b.transition_range(var_num, '0'..='9', var_num)?;
    b.mark_final(var, Symbol::Term(ExprSymbol::Variable))?;
    b.mark_final(var_num, Symbol::Term(ExprSymbol::Variable))?;

    // 单字符操作符与括号
    let ops = [
        ('+', ExprSymbol::Plus),
        ('-', ExprSymbol::Minus),
        ('*', ExprSymbol::Times),
        ('/', ExprSymbol::Divide),
        ('&', ExprSymbol::BitAnd),
        ('|', ExprSymbol::BitOr),
        ('(', ExprSymbol::LParen),
        (')', ExprSymbol::RParen),
    ];
    for (c, symbol) in ops {
        let state = b.add_state();
        b.transition_char(START_STATE, c, state)?;
        b.mark_final(state, Symbol::Term(symbol))?;
    }

    // 空白吞并为 Skip
    for c in [' ', '\t', '\r', '\n'] {
        b.transition_char(START_STATE, c, ws)?;
        b.transition_char(ws, c, ws)?;
    }
    b.mark_final(ws, Symbol::Skip)?;

    // EOF 是一条普通的边
    b.transition(START_STATE, EOF, eof)?;
    b.mark_final(eof, Symbol::Eof)?;

    b.build()
}

/// 构建表达式文法的自动机
///
/// 文法是静态写死的，构建失败属于本 crate 自身的缺陷。
pub fn expr_dfa() -> Dfa<ExprSymbol> {
    build().unwrap()
}
