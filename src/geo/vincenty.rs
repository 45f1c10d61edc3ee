//! 椭球面距离
//!
//! Vincenty 逆解：WGS84 椭球上两点间的测地线距离（米）。

use super::point::GeoPoint;

// WGS84 椭球参数
const WGS84_A: f64 = 6_378_137.0; // 长半轴（米）
const WGS84_F: f64 = 1.0 / 298.257_223_563; // 扁率
const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F); // 短半轴（米）

// 迭代收敛阈值与上限。近对跖点可能不收敛，此时取最后一次迭代值：
// 这类点对相距上万公里，远超任何通信距离，不影响在/出范围判定。
const CONVERGENCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 200;

/// 两点间的测地线距离（米）。对称、非负，重合点返回 0。
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let l = b.lon_rad() - a.lon_rad();
    // 归化纬度
    let u1 = ((1.0 - WGS84_F) * a.lat_rad().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * b.lat_rad().tan()).atan();

    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut iterations = 0;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 0.0;
    let mut sigma = 0.0;
    let mut cos_sq_alpha = 0.0;
    let mut cos_2sigma_m = 0.0;

    loop {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // 两点重合
            return 0.0;
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        cos_2sigma_m = if cos_sq_alpha == 0.0 {
            // 赤道测地线
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        iterations += 1;
        if (lambda - lambda_prev).abs() < CONVERGENCE || iterations >= MAX_ITERATIONS {
            break;
        }
    }

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a_coef = 1.0 + u_sq / 16_384.0 * (4_096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b_coef = u_sq / 1_024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = b_coef
        * sin_sigma
        * (cos_2sigma_m
            + b_coef / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - b_coef / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

    WGS84_B * a_coef * (sigma - delta_sigma)
}
