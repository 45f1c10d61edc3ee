//! 行解析器
//!
//! 把一行原始轨迹文本解析为位置报告。
//!
//! 输入格式：`<节点 id>;<时间戳>[+时区][.小数秒];POINT(<经度> <纬度>)`。
//! 时区后缀与小数秒在解析前被丢弃，时间戳按 `YYYY-MM-DD HH:MM:SS` 解析。

use super::record::PositionReport;
use crate::conn::NodeId;
use crate::error::TraceError;
use crate::geo::GeoPoint;
use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 解析一行记录。任何格式问题都返回 [`TraceError::MalformedRecord`]，
/// 坐标越界同样视为解析失败而不是截断。无副作用。
pub fn parse_record(raw: &str) -> Result<PositionReport, TraceError> {
    let raw = raw.trim_end_matches(['\n', '\r']);
    let mut fields = raw.split(';');
    let (Some(id_field), Some(ts_field), Some(pos_field), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed(raw, "expected 3 ';'-separated fields"));
    };

    let node = id_field
        .trim()
        .parse::<i64>()
        .map(NodeId)
        .map_err(|_| malformed(raw, "node id is not an integer"))?;

    let at = parse_timestamp(ts_field).ok_or_else(|| malformed(raw, "unparsable timestamp"))?;

    let pos = parse_point(pos_field).map_err(|reason| malformed(raw, reason))?;

    Ok(PositionReport { node, at, pos })
}

/// 时间戳字段形如 `2008-02-02 15:36:08+01` 或带 `.123` 小数秒，
/// 只保留第一个 `+` 和第一个 `.` 之前的部分。
fn parse_timestamp(field: &str) -> Option<NaiveDateTime> {
    let field = field.split('+').next()?;
    let field = field.split('.').next()?;
    NaiveDateTime::parse_from_str(field.trim(), TIMESTAMP_FORMAT).ok()
}

/// WKT 点：`POINT(<经度> <纬度>)`。
fn parse_point(field: &str) -> Result<GeoPoint, &'static str> {
    let inner = field
        .trim()
        .strip_prefix("POINT(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or("position is not in POINT(x y) notation")?;

    let mut coords = inner.split_whitespace();
    let (Some(lon_raw), Some(lat_raw), None) = (coords.next(), coords.next(), coords.next())
    else {
        return Err("POINT must contain exactly 2 coordinates");
    };

    let lon: f64 = lon_raw.parse().map_err(|_| "longitude is not a number")?;
    let lat: f64 = lat_raw.parse().map_err(|_| "latitude is not a number")?;

    GeoPoint::new(lat, lon).ok_or("coordinates out of range")
}

fn malformed(raw: &str, reason: &str) -> TraceError {
    TraceError::MalformedRecord(format!("{reason} in {raw:?}"))
}
