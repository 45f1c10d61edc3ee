//! 经纬度点
//!
//! 定义十进制度表示的地理坐标点。

/// 地理坐标点（十进制度）。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat_deg: f64,
    lon_deg: f64,
}

impl GeoPoint {
    /// 构造坐标点。纬度必须在 [-90, 90]、经度在 [-180, 180] 内，
    /// 越界返回 None（由解析层转成错误，不做截断）。
    pub fn new(lat_deg: f64, lon_deg: f64) -> Option<Self> {
        if !(-90.0..=90.0).contains(&lat_deg) || !(-180.0..=180.0).contains(&lon_deg) {
            return None;
        }
        Some(Self { lat_deg, lon_deg })
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_deg
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }
}
