//! munch-log - 结构化日志系统
//!
//! 为 munch 词法分析器设计的轻量日志系统，特点：
//! - **显式传递**：无全局 logger，`Arc<Logger>` 通过构造函数传入
//! - **非阻塞**：环形缓冲区满了覆盖旧数据，日志不卡扫描主路径
//! - **可测试**：`LogRingBuffer` 既是 sink 也是断言工具，测试可以
//!   直接检查日志内容
//!
//! # 快速开始
//!
//! ```
//! use munch_log::{LogConfig, Level, debug};
//!
//! let (logger, ring) = LogConfig::new(Level::Debug).with_ring_buffer(100).init();
//! debug!(logger, "scanner ready");
//! assert_eq!(ring.unwrap().len(), 1);
//! ```

mod config;
mod logger;
mod macros;
mod record;
mod ring_buffer;

pub use config::{LogConfig, OutputConfig};
pub use logger::{LogSink, Logger, StderrSink, StdoutSink};
pub use record::{Level, Record};
pub use ring_buffer::{LogRingBuffer, RingBufferStats};

// 宏通过 #[macro_export] 自动导出到 crate 根：
// trace!, debug!, info!, warn!, error!, log!
