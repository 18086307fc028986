//! 输入层：源位置追踪与字节流抽象

pub mod position;
pub mod stream;

pub use position::{SourcePosition, SourceSpan};
pub use stream::{ByteStream, Code, StreamError, EOF};
