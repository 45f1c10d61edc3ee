//! 连接事件
//!
//! 定义链路状态转换产生的 UP/DOWN 事件及其输出行格式。

use super::link::LinkKey;
use crate::sim::SimTime;
use std::fmt;

/// 事件类别：链路进入范围（UP）或离开范围（DOWN）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnEventKind {
    Up,
    Down,
}

impl fmt::Display for ConnEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnEventKind::Up => write!(f, "UP"),
            ConnEventKind::Down => write!(f, "DOWN"),
        }
    }
}

/// 一条连接事件，带产生时刻的仿真时钟值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnEvent {
    pub at: SimTime,
    pub key: LinkKey,
    pub kind: ConnEventKind,
}

// 输出行格式：`<clock> CONN <min_id> <max_id> <UP|DOWN>`，
// 下游仿真器按此逐行读取。
impl fmt::Display for ConnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} CONN {} {} {}",
            self.at,
            self.key.min_id(),
            self.key.max_id(),
            self.kind
        )
    }
}
