//! 字节流抽象
//!
//! 将任意阻塞的 [`std::io::Read`] 源包装为带单字节预读的输入码流。
//! 流结束不是带外信号：耗尽后 [`peek`](ByteStream::peek) 恒定返回
//! [`EOF`] 码，让文法表可以用一条普通的转移边表达"文件在哪里结束"。

use std::io::{self, Read};

use super::position::SourcePosition;

/// 输入码：0..=255 的字节值，外加 EOF 哨兵 -1
pub type Code = i32;

/// 流结束哨兵码，扩展字母表的合法成员
pub const EOF: Code = -1;

/// 字节流错误
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("I/O error while reading source: {0}")]
    Io(#[from] io::Error),
}

/// 字节流
///
/// 持有读游标位置和至多一个未消费的预读码。预读码就是跨 token
/// 边界携带的 lookahead：上一个 token 匹配失败的那个码留在这里，
/// 成为下一个 token 的第一个码，绝不会被重复读取。
pub struct ByteStream<R> {
    /// 底层阻塞读取源
    inner: R,
    /// 预读缓冲（至多一个码）
    lookahead: Option<Code>,
    /// 当前游标位置
    position: SourcePosition,
}

impl<R: Read> ByteStream<R> {
    /// 包装一个阻塞读取源
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: None,
            position: SourcePosition::start(),
        }
    }

    /// 获取当前游标位置
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// 预读下一个码（不消费）
    ///
    /// 只有预读缓冲为空时才会触发一次底层读取；
    /// 流耗尽后恒定返回 [`EOF`]。
    pub fn peek(&mut self) -> Result<Code, StreamError> {
        if let Some(code) = self.lookahead {
            return Ok(code);
        }
        let code = self.read_code()?;
        self.lookahead = Some(code);
        Ok(code)
    }

    /// 消费并返回下一个码，推进游标位置
    ///
    /// EOF 码可以被"消费"（让文法的 EOF 边正常走通），
    /// 但不移动游标，且之后仍然可以重复 peek 到 EOF。
    pub fn advance(&mut self) -> Result<Code, StreamError> {
        let code = match self.lookahead.take() {
            Some(code) => code,
            None => self.read_code()?,
        };
        match u8::try_from(code) {
            Ok(byte) => self.position.advance(byte),
            Err(_) => self.lookahead = Some(EOF),
        }
        Ok(code)
    }

    /// 从底层源读取一个码（阻塞）
    fn read_code(&mut self) -> Result<Code, StreamError> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(EOF),
                Ok(_) => return Ok(Code::from(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<'a> ByteStream<&'a [u8]> {
    /// 从内存字节切片创建（测试和一次性输入的便捷入口）
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}
