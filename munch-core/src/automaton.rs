//! 自动机：不可变转移表及其构建器
//!
//! 表示选择了稠密二维表：每个状态一行，行宽覆盖整个扩展字母表
//! （256 个字节码加 EOF 哨兵）。行内 `None` 即"无此边"，
//! 这是最长匹配停下来的唯一依据。
//!
//! 表一旦由 [`DfaBuilder::build`] 产出即不可变，扫描过程
//! 只读不写，同一张表可以被多个 Scanner 共享。

use std::fmt;
use std::ops::RangeInclusive;

use crate::core::{Code, EOF};

/// 状态编号（构建器按添加顺序分配）
pub type StateId = usize;

/// 起始状态，构建器创建时即存在
pub const START_STATE: StateId = 0;

/// 扩展字母表宽度：256 个字节码 + EOF
const ALPHABET_SIZE: usize = 257;

/// 符号种类
///
/// 终态的标注。`Skip` 和 `Eof` 是结构化的内建种类而非魔法值：
/// Scanner 靠模式匹配识别它们，文法作者无法与词法种类混淆。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol<K> {
    /// 匹配成功但不产出 token（空白、注释）
    Skip,
    /// 输入结束
    Eof,
    /// 文法定义的词法种类
    Term(K),
}

/// 自动机构建错误
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("unknown state id: {0}")]
    InvalidStateId(StateId),

    #[error("code out of alphabet range: {0}")]
    CodeOutOfRange(Code),

    #[error("char does not fit in a single byte: {0:?}")]
    NonByteChar(char),

    #[error("state {0} is a dead end: non-final with no outgoing transition")]
    DeadEndState(StateId),
}

/// 码到列下标的映射：EOF(-1) 占第 0 列，字节码依次后移
fn code_index(code: Code) -> Option<usize> {
    if (EOF..=255).contains(&code) {
        Some((code + 1) as usize)
    } else {
        None
    }
}

/// 确定性有限自动机
///
/// 类型参数 `K` 是文法自带的词法种类，表本身对它完全不感知。
pub struct Dfa<K> {
    /// 转移表：`transitions[state][code + 1]`
    transitions: Vec<[Option<StateId>; ALPHABET_SIZE]>,
    /// 终态标注：`None` 表示非终态
    symbols: Vec<Option<Symbol<K>>>,
}

impl<K> Dfa<K> {
    /// 起始状态
    pub fn start_state(&self) -> StateId {
        START_STATE
    }

    /// 状态总数
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// 查询转移边：`None` 即无此边
    ///
    /// 越界的状态或码是调用方的编程错误，直接 panic。
    pub fn next(&self, state: StateId, code: Code) -> Option<StateId> {
        let row = &self.transitions[state];
        let col = code_index(code).unwrap_or_else(|| panic!("code out of alphabet range: {code}"));
        row[col]
    }

    /// 该状态是否为终态
    pub fn is_final(&self, state: StateId) -> bool {
        self.symbols[state].is_some()
    }

    /// 取终态的符号标注
    ///
    /// # Panics
    ///
    /// 对非终态调用是编程错误。
    pub fn symbol(&self, state: StateId) -> &Symbol<K> {
        self.symbols[state]
            .as_ref()
            .unwrap_or_else(|| panic!("state {state} is not a final state"))
    }
}

impl<K: fmt::Debug> fmt::Debug for Dfa<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfa")
            .field("states", &self.state_count())
            .field("symbols", &self.symbols)
            .finish()
    }
}

/// 自动机构建器
///
/// 先添加状态和边，最后 [`build`](Self::build) 校验并冻结。
/// 起始状态在构建器创建时就存在，编号恒为 [`START_STATE`]。
#[derive(Debug)]
pub struct DfaBuilder<K> {
    transitions: Vec<[Option<StateId>; ALPHABET_SIZE]>,
    symbols: Vec<Option<Symbol<K>>>,
}

impl<K> DfaBuilder<K> {
    pub fn new() -> Self {
        Self {
            transitions: vec![[None; ALPHABET_SIZE]],
            symbols: vec![None],
        }
    }

    /// 添加一个新状态，返回其编号
    pub fn add_state(&mut self) -> StateId {
        let id = self.transitions.len();
        self.transitions.push([None; ALPHABET_SIZE]);
        self.symbols.push(None);
        id
    }

    fn check_state(&self, state: StateId) -> Result<(), AutomatonError> {
        if state < self.transitions.len() {
            Ok(())
        } else {
            Err(AutomatonError::InvalidStateId(state))
        }
    }

    /// 添加一条转移边（按码）
    ///
    /// 同一 (from, code) 的重复添加取最后一次，确定性由表结构保证。
    pub fn transition(
        &mut self,
        from: StateId,
        code: Code,
        to: StateId,
    ) -> Result<&mut Self, AutomatonError> {
        self.check_state(from)?;
        self.check_state(to)?;
        let col = code_index(code).ok_or(AutomatonError::CodeOutOfRange(code))?;
        self.transitions[from][col] = Some(to);
        Ok(self)
    }

    /// 添加一条转移边（按字符，必须是单字节字符）
    pub fn transition_char(
        &mut self,
        from: StateId,
        c: char,
        to: StateId,
    ) -> Result<&mut Self, AutomatonError> {
        if c as u32 > 255 {
            return Err(AutomatonError::NonByteChar(c));
        }
        self.transition(from, c as Code, to)
    }

    /// 为一段连续字符区间批量添加同目标的转移边
    pub fn transition_range(
        &mut self,
        from: StateId,
        range: RangeInclusive<char>,
        to: StateId,
    ) -> Result<&mut Self, AutomatonError> {
        for c in range {
            self.transition_char(from, c, to)?;
        }
        Ok(self)
    }

    /// 将状态标记为终态并赋予符号
    pub fn mark_final(&mut self, state: StateId, symbol: Symbol<K>) -> Result<&mut Self, AutomatonError> {
        self.check_state(state)?;
        self.symbols[state] = Some(symbol);
        Ok(self)
    }

    /// 校验并冻结为不可变自动机
    ///
    /// 拒绝"死胡同"状态：既非终态又没有任何出边的状态一旦进入
    /// 就注定报错，这属于文法本身的缺陷，在构建期暴露。
    pub fn build(self) -> Result<Dfa<K>, AutomatonError> {
        for (state, row) in self.transitions.iter().enumerate() {
            let has_edge = row.iter().any(|t| t.is_some());
            if !has_edge && self.symbols[state].is_none() {
                return Err(AutomatonError::DeadEndState(state));
            }
        }
        Ok(Dfa {
            transitions: self.transitions,
            symbols: self.symbols,
        })
    }
}

impl<K> Default for DfaBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 最小文法：start --'a'--> 终态
    fn single_edge_dfa() -> Dfa<&'static str> {
        let mut builder = DfaBuilder::new();
        let fin = builder.add_state();
        builder.transition_char(START_STATE, 'a', fin).unwrap();
        builder.mark_final(fin, Symbol::Term("a")).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_basic_transition() {
        let dfa = single_edge_dfa();

        assert_eq!(dfa.start_state(), START_STATE);
        assert_eq!(dfa.state_count(), 2);

        let next = dfa.next(START_STATE, 'a' as Code);
        assert_eq!(next, Some(1));
        assert!(dfa.is_final(1));
        assert_eq!(dfa.symbol(1), &Symbol::Term("a"));
    }

    #[test]
    fn test_missing_edge_is_none() {
        let dfa = single_edge_dfa();
        assert_eq!(dfa.next(START_STATE, 'b' as Code), None);
        assert_eq!(dfa.next(START_STATE, EOF), None);
    }

    #[test]
    fn test_eof_edge() {
        let mut builder = DfaBuilder::new();
        let eof_state = builder.add_state();
        builder.transition(START_STATE, EOF, eof_state).unwrap();
        builder.mark_final(eof_state, Symbol::<&str>::Eof).unwrap();
        let dfa = builder.build().unwrap();

        assert_eq!(dfa.next(START_STATE, EOF), Some(eof_state));
        assert_eq!(dfa.symbol(eof_state), &Symbol::Eof);
    }

    #[test]
    fn test_transition_range() {
        let mut builder = DfaBuilder::new();
        let digits = builder.add_state();
        builder.transition_range(START_STATE, '0'..='9', digits).unwrap();
        builder.mark_final(digits, Symbol::Term("digit")).unwrap();
        let dfa = builder.build().unwrap();

        for c in '0'..='9' {
            assert_eq!(dfa.next(START_STATE, c as Code), Some(digits));
        }
        assert_eq!(dfa.next(START_STATE, 'a' as Code), None);
    }

    #[test]
    fn test_invalid_state_rejected() {
        let mut builder = DfaBuilder::<&str>::new();
        assert_eq!(
            builder.transition_char(START_STATE, 'a', 99).unwrap_err(),
            AutomatonError::InvalidStateId(99)
        );
        assert_eq!(
            builder.mark_final(42, Symbol::Skip).unwrap_err(),
            AutomatonError::InvalidStateId(42)
        );
    }

    #[test]
    fn test_code_out_of_range_rejected() {
        let mut builder = DfaBuilder::<&str>::new();
        let s = builder.add_state();
        assert_eq!(
            builder.transition(START_STATE, 256, s).unwrap_err(),
            AutomatonError::CodeOutOfRange(256)
        );
        assert_eq!(
            builder.transition(START_STATE, -2, s).unwrap_err(),
            AutomatonError::CodeOutOfRange(-2)
        );
    }

    #[test]
    fn test_non_byte_char_rejected() {
        let mut builder = DfaBuilder::<&str>::new();
        let s = builder.add_state();
        builder.mark_final(s, Symbol::Skip).unwrap();
        assert_eq!(
            builder.transition_char(START_STATE, '中', s).unwrap_err(),
            AutomatonError::NonByteChar('中')
        );
    }

    #[test]
    fn test_dead_end_state_rejected() {
        let mut builder = DfaBuilder::<&str>::new();
        let dead = builder.add_state();
        builder.transition_char(START_STATE, 'a', dead).unwrap();
        // dead 既非终态也没有出边
        assert_eq!(
            builder.build().unwrap_err(),
            AutomatonError::DeadEndState(1)
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut builder = DfaBuilder::new();
        let a = builder.add_state();
        let b = builder.add_state();
        builder.mark_final(a, Symbol::Term("a")).unwrap();
        builder.mark_final(b, Symbol::Term("b")).unwrap();
        builder.transition_char(START_STATE, 'x', a).unwrap();
        builder.transition_char(START_STATE, 'x', b).unwrap();
        let dfa = builder.build().unwrap();

        assert_eq!(dfa.next(START_STATE, 'x' as Code), Some(b));
    }

    #[test]
    #[should_panic(expected = "not a final state")]
    fn test_symbol_on_non_final_panics() {
        let dfa = single_edge_dfa();
        let _ = dfa.symbol(START_STATE);
    }
}
