//! 位置报告
//!
//! 定义一条轨迹记录解析后的结构化形式。

use crate::conn::NodeId;
use crate::geo::GeoPoint;
use chrono::NaiveDateTime;

/// 一条位置报告：某节点在某一时刻的经纬度。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionReport {
    pub node: NodeId,
    pub at: NaiveDateTime,
    pub pos: GeoPoint,
}
