//! 位置表
//!
//! 维护每个节点最近一次上报的位置。

use super::record::PositionReport;
use crate::conn::NodeId;
use std::collections::BTreeMap;

/// 位置表：每个节点 id 一个条目，更新时覆盖，节点一旦出现便不再删除。
///
/// 底层用 BTreeMap 保证按 id 升序遍历，使同一时刻产生的多条事件顺序稳定。
#[derive(Debug, Default)]
pub struct PositionTable {
    entries: BTreeMap<NodeId, PositionReport>,
}

impl PositionTable {
    /// 写入新报告，返回该节点之前的报告（若已知）。
    /// 调用方据此判断位置是否真的变化、是否需要重新评估对端距离。
    pub fn upsert(&mut self, report: PositionReport) -> Option<PositionReport> {
        self.entries.insert(report.node, report)
    }

    /// 获取某节点的当前报告
    pub fn get(&self, node: NodeId) -> Option<&PositionReport> {
        self.entries.get(&node)
    }

    /// 已知节点数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按 id 升序遍历除 `except` 之外的所有节点
    pub fn peers_of(&self, except: NodeId) -> impl Iterator<Item = &PositionReport> {
        self.entries
            .iter()
            .filter(move |(id, _)| **id != except)
            .map(|(_, report)| report)
    }
}
