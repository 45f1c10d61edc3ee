//! 统计信息
//!
//! 定义运行期计数器与运行结束后的汇总。

use serde::Serialize;

/// 运行期统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    /// 消费的输入行数
    pub lines_read: u64,
    /// 实际引起位置变化（触发重新评估）的记录数
    pub reports_applied: u64,
    pub events_up: u64,
    pub events_down: u64,
}

/// 运行汇总（含终态信息），可序列化为 JSON 侧车文件。
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub lines_read: u64,
    pub reports_applied: u64,
    pub nodes_seen: usize,
    pub events_up: u64,
    pub events_down: u64,
    pub clock_end_secs: u64,
}
