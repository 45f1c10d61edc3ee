//! 连通性引擎
//!
//! 把解析器、位置表、逻辑时钟、距离判定和连接跟踪器串成单线程流水线：
//! 一条记录完整处理完（解析、更新位置、推进时钟、两两判定、发出事件）
//! 才读取下一条。

use super::id::NodeId;
use super::link::LinkKey;
use super::sink::EventSink;
use super::tracker::ConnTracker;
use crate::error::TraceError;
use crate::geo::{RangeClass, classify};
use crate::sim::{SimClock, SimTime};
use crate::stats::{RunStats, RunSummary};
use crate::trace::{PositionReport, PositionTable, parse_record};
use tracing::{debug, trace};

/// 收尾扫描策略：对打开集重新量距，关闭已出范围的链路。
///
/// 链路距离只会在端点上报时变化，而上报本身已触发两两判定，
/// 因此扫描是一致性兜底而非主要关闭路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPolicy {
    /// 每条记录后复查所有打开链路
    #[default]
    All,
    /// 只复查涉及本次上报节点的打开链路
    Touching,
    /// 不扫描，仅依赖两两判定
    Off,
}

/// 引擎配置
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// 理论传输距离（米）
    pub range_m: f64,
    /// 收尾扫描策略
    pub sweep: SweepPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            range_m: 100.0,
            sweep: SweepPolicy::All,
        }
    }
}

/// 连通性引擎：整个运行期的可变状态都集中在这里，每次运行构造一个。
#[derive(Debug, Default)]
pub struct Engine {
    cfg: EngineConfig,
    table: PositionTable,
    clock: SimClock,
    tracker: ConnTracker,
    stats: RunStats,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// 当前仿真时钟值
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// 运行统计
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// 当前打开的链路数
    pub fn open_links(&self) -> usize {
        self.tracker.open_count()
    }

    /// 已知节点数
    pub fn nodes_seen(&self) -> usize {
        self.table.len()
    }

    /// 消费一行原始输入
    pub fn consume_line(&mut self, raw: &str, sink: &mut dyn EventSink) -> Result<(), TraceError> {
        let report = parse_record(raw)?;
        self.consume_report(report, sink)
    }

    /// 消费一条已解析的位置报告
    #[tracing::instrument(skip(self, sink), fields(node = %report.node, at = %report.at))]
    pub fn consume_report(
        &mut self,
        report: PositionReport,
        sink: &mut dyn EventSink,
    ) -> Result<(), TraceError> {
        // 即使位置没有变化，墙钟时间也过去了：时钟对每条记录都推进
        let now = self.clock.advance(report.at)?;
        self.stats.lines_read += 1;

        let prev = self.table.upsert(report);
        if let Some(prev) = prev
            && prev.pos == report.pos
        {
            // 位置未变，对端距离不可能变化，跳过重新评估
            trace!("位置未变化，跳过评估");
            return Ok(());
        }
        self.stats.reports_applied += 1;

        self.evaluate_pairs(&report, now, sink)?;
        self.sweep_open_links(report.node, now, sink)?;
        Ok(())
    }

    /// 对上报节点与位置表中其余所有节点做两两距离判定
    fn evaluate_pairs(
        &mut self,
        report: &PositionReport,
        now: SimTime,
        sink: &mut dyn EventSink,
    ) -> Result<(), TraceError> {
        for peer in self.table.peers_of(report.node) {
            let key = LinkKey::new(report.node, peer.node);
            match classify(report.pos, peer.pos, self.cfg.range_m) {
                RangeClass::InRange => {
                    if self.tracker.open(key, now, sink)? {
                        self.stats.events_up += 1;
                    }
                }
                RangeClass::OutOfRange => {
                    if self.tracker.close(key, now, sink)? {
                        self.stats.events_down += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// 按策略复查打开集，关闭已出范围的链路
    fn sweep_open_links(
        &mut self,
        updated: NodeId,
        now: SimTime,
        sink: &mut dyn EventSink,
    ) -> Result<(), TraceError> {
        let keys: Vec<LinkKey> = match self.cfg.sweep {
            SweepPolicy::Off => return Ok(()),
            SweepPolicy::All => self.tracker.open_links().map(|l| l.key).collect(),
            SweepPolicy::Touching => self
                .tracker
                .open_links()
                .map(|l| l.key)
                .filter(|k| k.involves(updated))
                .collect(),
        };

        for key in keys {
            let (Some(a), Some(b)) = (self.table.get(key.min_id()), self.table.get(key.max_id()))
            else {
                // 打开的链路两端必然上报过位置
                continue;
            };
            if classify(a.pos, b.pos, self.cfg.range_m) == RangeClass::OutOfRange
                && self.tracker.close(key, now, sink)?
            {
                self.stats.events_down += 1;
            }
        }
        Ok(())
    }

    /// 输入结束：强制关闭仍打开的链路并返回运行汇总。
    /// 外部调用方必须在读完输入后调用一次。
    pub fn finish(&mut self, sink: &mut dyn EventSink) -> Result<RunSummary, TraceError> {
        let at = self.clock.now();
        let closed = self.tracker.close_all(at, sink)?;
        self.stats.events_down += closed;
        if closed > 0 {
            debug!(closed, at = %at, "收尾关闭仍打开的链路");
        }
        sink.flush()?;
        Ok(RunSummary {
            lines_read: self.stats.lines_read,
            reports_applied: self.stats.reports_applied,
            nodes_seen: self.table.len(),
            events_up: self.stats.events_up,
            events_down: self.stats.events_down,
            clock_end_secs: at.as_secs(),
        })
    }
}
