//! Fixture paths shared by the tests of the workspace crates

use geotrace_geo::{EARTH_RADIUS_M, LatLng};

/// Length of one degree of arc along a great circle, in meters
pub const ONE_DEGREE_ARC_M: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Tolerance used when comparing computed distances
pub const DISTANCE_TOLERANCE_M: f64 = 0.01;

/// Three collinear points on the equator, one degree of longitude apart
pub fn equator_points() -> [LatLng; 3] {
    [
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 1.0),
        LatLng::new(0.0, 2.0),
    ]
}

/// A short walk around Phitsanulok, the default map view
pub fn phitsanulok_walk() -> Vec<LatLng> {
    vec![
        LatLng::new(16.812032, 100.463233),
        LatLng::new(16.815120, 100.466710),
        LatLng::new(16.818450, 100.465020),
        LatLng::new(16.821003, 100.469871),
        LatLng::new(16.824517, 100.471542),
    ]
}

/// Two points with distinct, non-symmetric coordinates so lat/lng swaps are detectable
pub fn two_point_path() -> [LatLng; 2] {
    [
        LatLng::new(16.812032, 100.463233),
        LatLng::new(-33.868820, 151.209290),
    ]
}

/// Assert that two distances are within [`DISTANCE_TOLERANCE_M`] of each other
#[track_caller]
pub fn assert_distance_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= DISTANCE_TOLERANCE_M,
        "distance {actual} differs from {expected} by more than {DISTANCE_TOLERANCE_M} m"
    );
}
