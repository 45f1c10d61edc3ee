//! 轨迹输入模块
//!
//! 此模块包含输入侧的核心组件：位置报告、行解析器和位置表。

// 子模块声明
mod parser;
mod record;
mod table;

// 重新导出公共接口
pub use parser::parse_record;
pub use record::PositionReport;
pub use table::PositionTable;
