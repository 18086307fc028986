//! 日志专用环形缓冲区

use crate::logger::LogSink;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// 环形缓冲区统计信息
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RingBufferStats {
    /// 当前记录数
    pub record_count: usize,
    /// 因缓冲区满而丢弃的记录数
    pub dropped_count: usize,
    /// 缓冲区容量
    pub capacity: usize,
}

/// 日志环形缓冲区
///
/// 当缓冲区满时，新记录会覆盖最旧的记录（FIFO）。
/// 测试中可以作为 sink 注入，再用 [`dump_records`](Self::dump_records)
/// 断言日志内容。
pub struct LogRingBuffer {
    inner: Mutex<VecDeque<Record>>,
    capacity: usize,
    dropped: AtomicUsize,
}

impl LogRingBuffer {
    /// 创建新的环形缓冲区
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(LogRingBuffer {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            dropped: AtomicUsize::new(0),
        })
    }

    /// 写入记录（满了则覆盖旧数据）
    fn push(&self, record: Record) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.len() >= self.capacity {
            inner.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        inner.push_back(record);
    }

    /// 获取当前所有记录（按时间顺序）
    pub fn dump_records(&self) -> Vec<Record> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.iter().cloned().collect()
    }

    /// 将日志转储到字符串
    pub fn dump(&self) -> String {
        self.dump_records()
            .iter()
            .map(Record::format)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 清空缓冲区
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.clear();
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// 获取统计信息
    pub fn stats(&self) -> RingBufferStats {
        RingBufferStats {
            record_count: self.len(),
            dropped_count: self.dropped.load(Ordering::Relaxed),
            capacity: self.capacity,
        }
    }

    /// 获取当前记录数
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 获取已丢弃的记录数
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl LogSink for Arc<LogRingBuffer> {
    fn write(&self, record: &Record) {
        self.push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    #[test]
    fn test_basic_operations() {
        let buffer = LogRingBuffer::new(3);

        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 3);

        buffer.push(Record::new(Level::Info, "test", "msg1"));
        assert_eq!(buffer.len(), 1);

        buffer.push(Record::new(Level::Info, "test", "msg2"));
        buffer.push(Record::new(Level::Info, "test", "msg3"));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_overflow_behavior() {
        let buffer = LogRingBuffer::new(3);

        for i in 0..5 {
            buffer.push(Record::new(Level::Info, "test", format!("msg{i}")));
        }

        assert_eq!(buffer.len(), 3);

        let records = buffer.dump_records();
        assert_eq!(records[0].message, "msg2");
        assert_eq!(records[1].message, "msg3");
        assert_eq!(records[2].message, "msg4");

        assert_eq!(buffer.dropped_count(), 2);
    }

    #[test]
    fn test_clear() {
        let buffer = LogRingBuffer::new(10);

        buffer.push(Record::new(Level::Info, "test", "msg1"));
        buffer.push(Record::new(Level::Info, "test", "msg2"));
        assert_eq!(buffer.len(), 2);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.dropped_count(), 0);
    }

    #[test]
    fn test_dump_format() {
        let buffer = LogRingBuffer::new(10);

        buffer.push(Record::new(Level::Info, "test", "first line"));
        buffer.push(Record::new(Level::Warn, "test", "second line"));

        let dump = buffer.dump();
        assert!(dump.contains("first line"));
        assert!(dump.contains("second line"));
        assert!(dump.contains("INFO"));
        assert!(dump.contains("WARN"));
    }

    #[test]
    fn test_stats() {
        let buffer = LogRingBuffer::new(5);

        let stats = buffer.stats();
        assert_eq!(stats.record_count, 0);
        assert_eq!(stats.dropped_count, 0);
        assert_eq!(stats.capacity, 5);

        for i in 0..10 {
            buffer.push(Record::new(Level::Info, "test", format!("msg{i}")));
        }

        let stats = buffer.stats();
        assert_eq!(stats.record_count, 5); // 容量上限
        assert_eq!(stats.dropped_count, 5);
    }

    #[test]
    fn test_log_sink_trait() {
        let buffer = LogRingBuffer::new(10);
        let record = Record::new(Level::Debug, "test::module", "test message");

        buffer.write(&record);

        let records = buffer.dump_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "test message");
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Barrier;

        let buffer = LogRingBuffer::new(1000);
        let barrier = Arc::new(Barrier::new(10));
        let mut handles = vec![];

        for i in 0..10 {
            let buf = Arc::clone(&buffer);
            let b = Arc::clone(&barrier);
            handles.push(std::thread::spawn(move || {
                // 同步所有线程，增加竞争概率
                b.wait();
                for j in 0..10 {
                    buf.push(Record::new(Level::Info, "test", format!("thread {i} msg {j}")));
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(buffer.len(), 100);
    }
}
