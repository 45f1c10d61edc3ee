//! 事件输出
//!
//! 定义事件的有序追加输出抽象及其文件 / 内存实现。

use super::event::ConnEvent;
use crate::error::TraceError;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// 事件输出抽象
pub trait EventSink {
    /// 追加一条事件。必须严格保持调用顺序，时钟值对下游是单调事件序列。
    fn append(&mut self, ev: &ConnEvent) -> Result<(), TraceError>;

    /// 刷新缓冲
    fn flush(&mut self) -> Result<(), TraceError> {
        Ok(())
    }
}

/// 文件输出：按行追加到目标文件。
///
/// 以追加模式打开，重跑不会截断已有事件日志。
#[derive(Debug)]
pub struct FileSink {
    w: BufWriter<File>,
}

impl FileSink {
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            w: BufWriter::new(file),
        })
    }
}

impl EventSink for FileSink {
    fn append(&mut self, ev: &ConnEvent) -> Result<(), TraceError> {
        writeln!(self.w, "{ev}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TraceError> {
        self.w.flush()?;
        Ok(())
    }
}

/// 内存输出：把事件收集到 Vec，测试用。
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<ConnEvent>,
}

impl EventSink for MemorySink {
    fn append(&mut self, ev: &ConnEvent) -> Result<(), TraceError> {
        self.events.push(*ev);
        Ok(())
    }
}
