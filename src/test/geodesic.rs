use crate::geo::{GeoPoint, RangeClass, classify, distance_m};

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).expect("test point in range")
}

#[test]
fn coincident_points_have_zero_distance() {
    let a = point(39.92123, 116.51172);
    assert_eq!(distance_m(a, a), 0.0);
}

#[test]
fn distance_is_symmetric() {
    let pairs = [
        (point(0.0, 0.0), point(0.0005, 0.0)),
        (point(50.1109, 8.6821), point(50.1110, 8.6830)),
        (point(-33.8688, 151.2093), point(48.8566, 2.3522)),
    ];
    for (a, b) in pairs {
        let fwd = distance_m(a, b);
        let rev = distance_m(b, a);
        assert!((fwd - rev).abs() < 1e-6, "fwd={fwd} rev={rev}");
    }
}

#[test]
fn half_millidegree_of_latitude_is_about_55_meters() {
    let d = distance_m(point(0.0, 0.0), point(0.0005, 0.0));
    assert!((54.0..57.0).contains(&d), "got {d}");
}

#[test]
fn one_degree_of_longitude_at_equator_is_about_111_km() {
    let d = distance_m(point(0.0, 0.0), point(0.0, 1.0));
    assert!((111_000.0..111_700.0).contains(&d), "got {d}");
}

#[test]
fn distance_is_nonnegative_across_hemispheres() {
    let d = distance_m(point(-45.0, -170.0), point(45.0, 170.0));
    assert!(d > 0.0);
}

#[test]
fn classify_uses_inclusive_threshold() {
    let a = point(0.0, 0.0);
    // coincident points are in range for any nonnegative range
    assert_eq!(classify(a, a, 0.0), RangeClass::InRange);

    let b = point(0.0005, 0.0);
    assert_eq!(classify(a, b, 100.0), RangeClass::InRange);
    assert_eq!(classify(a, b, 10.0), RangeClass::OutOfRange);
}

#[test]
fn classify_is_symmetric() {
    let a = point(39.9200, 116.5100);
    let b = point(39.9210, 116.5110);
    for range in [1.0, 100.0, 10_000.0] {
        assert_eq!(classify(a, b, range), classify(b, a, range));
    }
}
