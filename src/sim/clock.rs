//! 逻辑时钟
//!
//! 定义由输入时间戳驱动的仿真时钟，维护自首条记录起的累计秒数。

use super::time::SimTime;
use crate::error::TraceError;
use chrono::NaiveDateTime;
use tracing::trace;

/// 逻辑时钟：首条记录作为基准，此后每条记录按与上一条的时间差累加。
///
/// 时间差必须非负；时间戳回退说明输入已乱序，直接返回
/// [`TraceError::NonMonotonicTime`]。
#[derive(Debug, Default)]
pub struct SimClock {
    now: SimTime,
    last_seen: Option<NaiveDateTime>,
}

impl SimClock {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 按新时间戳推进时钟，返回推进后的累计时间。
    ///
    /// 首次调用只记录基准，返回 `SimTime::ZERO`。
    pub fn advance(&mut self, at: NaiveDateTime) -> Result<SimTime, TraceError> {
        let Some(last) = self.last_seen else {
            self.last_seen = Some(at);
            trace!(baseline = %at, "时钟基准已建立");
            return Ok(self.now);
        };

        let delta = (at - last).num_seconds();
        if delta < 0 {
            return Err(TraceError::NonMonotonicTime {
                previous: last,
                current: at,
            });
        }

        self.now = SimTime(self.now.0.saturating_add(delta as u64));
        self.last_seen = Some(at);
        trace!(delta_secs = delta, now = %self.now, "时钟推进");
        Ok(self.now)
    }
}
