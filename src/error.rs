//! 错误类型
//!
//! 定义整个转换流程的错误分类。所有错误都是致命的：跳过一条坏记录会
//! 破坏位置表和时钟的连续性，下游仿真器假定事件日志完整一致。

use chrono::NaiveDateTime;
use thiserror::Error;

/// 轨迹转换错误
#[derive(Debug, Error)]
pub enum TraceError {
    /// 输入行无法解析为位置报告
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// 新记录的时间戳早于上一条记录
    #[error("non-monotonic timestamp: {current} is earlier than {previous}")]
    NonMonotonicTime {
        previous: NaiveDateTime,
        current: NaiveDateTime,
    },

    /// 事件输出写入失败
    #[error("event sink write failed: {0}")]
    SinkWrite(#[from] std::io::Error),
}
