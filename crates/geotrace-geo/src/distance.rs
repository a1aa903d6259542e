use crate::LatLng;

/// Mean Earth radius in meters, same value as Leaflet's `CRS.Earth.R`
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle surface distance in meters between two points (haversine formula)
pub fn haversine_distance(a: &LatLng, b: &LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let sin_dlat = ((b.lat - a.lat).to_radians() / 2.0).sin();
    let sin_dlng = ((b.lng - a.lng).to_radians() / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Arithmetic midpoint of the two coordinates, used to anchor segment labels
#[inline]
pub fn midpoint(a: &LatLng, b: &LatLng) -> LatLng {
    LatLng::new((a.lat + b.lat) / 2.0, (a.lng + b.lng) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONE_DEGREE_M: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

    #[test]
    fn test_same_point_is_zero() {
        let p = LatLng::new(16.81, 100.46);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let d = haversine_distance(&LatLng::new(0.0, 0.0), &LatLng::new(0.0, 1.0));
        assert!((d - ONE_DEGREE_M).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_one_degree_along_meridian() {
        let d = haversine_distance(&LatLng::new(10.0, 20.0), &LatLng::new(11.0, 20.0));
        assert!((d - ONE_DEGREE_M).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_symmetric() {
        let a = LatLng::new(55.6761, 12.5683);
        let b = LatLng::new(51.5074, -0.1278);
        assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
    }

    #[test]
    fn test_copenhagen_london() {
        // ~955 km
        let d = haversine_distance(&LatLng::new(55.6761, 12.5683), &LatLng::new(51.5074, -0.1278));
        assert!((950_000.0..960_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(&LatLng::new(10.0, 20.0), &LatLng::new(12.0, 24.0));
        assert_eq!(m, LatLng::new(11.0, 22.0));
    }
}
