//! 链路类型
//!
//! 定义无序节点对的规范化键以及打开状态的链路。

use super::id::NodeId;
use crate::sim::SimTime;
use std::fmt;

/// 链路键：无序节点对，规范化为 (min, max)，(A,B) 与 (B,A) 指同一条链路。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkKey {
    a: NodeId,
    b: NodeId,
}

impl LinkKey {
    /// 构造规范化链路键
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    /// 较小的节点 id
    pub fn min_id(&self) -> NodeId {
        self.a
    }

    /// 较大的节点 id
    pub fn max_id(&self) -> NodeId {
        self.b
    }

    /// 该链路是否涉及指定节点
    pub fn involves(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.a, self.b)
    }
}

/// 打开状态的链路：从进入范围到离开范围（或运行结束被强制关闭）为止。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenLink {
    pub key: LinkKey,
    pub opened_at: SimTime,
}
