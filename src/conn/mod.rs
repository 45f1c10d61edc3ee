//! 连通性检测模块
//!
//! 此模块包含连通性引擎的核心组件：节点/链路标识、连接事件、事件输出、
//! 连接跟踪器以及把各部件串起来的引擎。

// 子模块声明
mod engine;
mod event;
mod id;
mod link;
mod sink;
mod tracker;

// 重新导出公共接口
pub use engine::{Engine, EngineConfig, SweepPolicy};
pub use event::{ConnEvent, ConnEventKind};
pub use id::NodeId;
pub use link::{LinkKey, OpenLink};
pub use sink::{EventSink, FileSink, MemorySink};
pub use tracker::ConnTracker;
