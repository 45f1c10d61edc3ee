//! 仿真时间模块
//!
//! 此模块包含仿真时钟的核心组件：仿真时间类型与由输入时间戳驱动的逻辑时钟。

// 子模块声明
mod clock;
mod time;

// 重新导出公共接口
pub use clock::SimClock;
pub use time::SimTime;
