//! 连接跟踪器
//!
//! 维护当前打开的链路集合，幂等地应用打开 / 关闭转换：
//! 每次状态变化恰好产生一条事件，重复转换不产生事件。

use super::event::{ConnEvent, ConnEventKind};
use super::link::{LinkKey, OpenLink};
use super::sink::EventSink;
use crate::error::TraceError;
use crate::sim::SimTime;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// 连接跟踪器：每条在范围内的链路在打开集中恰有一个条目。
#[derive(Debug, Default)]
pub struct ConnTracker {
    open: BTreeMap<LinkKey, OpenLink>,
}

impl ConnTracker {
    /// 当前打开的链路数
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// 某链路是否处于打开状态
    pub fn is_open(&self, key: LinkKey) -> bool {
        self.open.contains_key(&key)
    }

    /// 按键升序遍历打开集
    pub fn open_links(&self) -> impl Iterator<Item = &OpenLink> {
        self.open.values()
    }

    /// 打开链路。已打开则不做任何事；发生转换时发出 UP 事件并返回 true。
    pub fn open(
        &mut self,
        key: LinkKey,
        at: SimTime,
        sink: &mut dyn EventSink,
    ) -> Result<bool, TraceError> {
        if self.open.contains_key(&key) {
            trace!(link = %key, "链路已打开，忽略");
            return Ok(false);
        }
        self.open.insert(key, OpenLink { key, opened_at: at });
        debug!(link = %key, at = %at, "🔗 链路建立");
        sink.append(&ConnEvent {
            at,
            key,
            kind: ConnEventKind::Up,
        })?;
        Ok(true)
    }

    /// 关闭链路。本就关闭则不做任何事；发生转换时发出 DOWN 事件并返回 true。
    pub fn close(
        &mut self,
        key: LinkKey,
        at: SimTime,
        sink: &mut dyn EventSink,
    ) -> Result<bool, TraceError> {
        if self.open.remove(&key).is_none() {
            trace!(link = %key, "链路本就关闭，忽略");
            return Ok(false);
        }
        debug!(link = %key, at = %at, "⛓️‍💥 链路断开");
        sink.append(&ConnEvent {
            at,
            key,
            kind: ConnEventKind::Down,
        })?;
        Ok(true)
    }

    /// 强制关闭所有仍打开的链路（输入结束时调用），返回关闭数量。
    pub fn close_all(
        &mut self,
        at: SimTime,
        sink: &mut dyn EventSink,
    ) -> Result<u64, TraceError> {
        let mut closed = 0;
        // BTreeMap 按键升序弹出，保证收尾事件顺序稳定
        while let Some((key, _)) = self.open.pop_first() {
            debug!(link = %key, at = %at, "链路在输入结束时仍打开，强制关闭");
            sink.append(&ConnEvent {
                at,
                key,
                kind: ConnEventKind::Down,
            })?;
            closed += 1;
        }
        Ok(closed)
    }
}
