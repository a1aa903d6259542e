use crate::LatLng;

/// Axis-aligned lat/lng bounds of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Bounds of all `points`, `None` if there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let init = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        Some(points.fold(init, |bb, p| Self {
            min_lat: bb.min_lat.min(p.lat),
            max_lat: bb.max_lat.max(p.lat),
            min_lng: bb.min_lng.min(p.lng),
            max_lng: bb.max_lng.max(p.lng),
        }))
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Slippy-map zoom level at which the whole box is visible with some padding
    pub fn zoom_level_to_fit(&self) -> f64 {
        let max_span = self.lat_span().max(self.lng_span());
        if max_span > 0.0 {
            let padded_span = max_span * 1.5;
            let zoom = (360.0 / padded_span).log2();
            zoom.clamp(2.0, 18.0)
        } else {
            16.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_has_no_bounds() {
        assert_eq!(BoundingBox::from_points(&[] as &[LatLng]), None);
    }

    #[test]
    fn test_bounds_and_center() {
        let points = [
            LatLng::new(10.0, 100.0),
            LatLng::new(12.0, 98.0),
            LatLng::new(11.0, 101.0),
        ];
        let bb = BoundingBox::from_points(&points).unwrap();
        assert_eq!(
            bb,
            BoundingBox {
                min_lat: 10.0,
                max_lat: 12.0,
                min_lng: 98.0,
                max_lng: 101.0
            }
        );
        assert_eq!(bb.center(), LatLng::new(11.0, 99.5));
    }

    #[test]
    fn test_single_point_zoom() {
        let bb = BoundingBox::from_points(&[LatLng::new(1.0, 1.0)]).unwrap();
        assert_eq!(bb.zoom_level_to_fit(), 16.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let bb = BoundingBox::from_points(&[LatLng::new(-80.0, -170.0), LatLng::new(80.0, 170.0)])
            .unwrap();
        assert_eq!(bb.zoom_level_to_fit(), 2.0);
    }
}
