use geotrace_geo::{LatLng, UnitLocale, format_distance, midpoint};

/// Two consecutive points of the path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: LatLng,
    pub end: LatLng,
    /// Meters
    pub distance_m: f64,
}

impl Segment {
    pub fn new(start: LatLng, end: LatLng) -> Self {
        Self {
            start,
            end,
            distance_m: start.distance_to(&end),
        }
    }

    pub fn midpoint(&self) -> LatLng {
        midpoint(&self.start, &self.end)
    }
}

/// All segments of the path, in path order
pub fn segments(points: &[LatLng]) -> impl Iterator<Item = Segment> + '_ {
    points.windows(2).map(|w| Segment::new(w[0], w[1]))
}

/// Text placed at the midpoint of a segment
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLabel {
    pub position: LatLng,
    pub distance_m: f64,
    pub text: String,
}

/// The map layers derived from the path for one render: a polyline and a distance label per segment.
///
/// An overlay is always replaced as a whole, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathOverlay {
    polyline: Option<Vec<LatLng>>,
    labels: Vec<DistanceLabel>,
    total_distance_m: f64,
}

impl PathOverlay {
    pub fn polyline(&self) -> Option<&[LatLng]> {
        self.polyline.as_deref()
    }

    /// Number of drawn lines, 0 or 1
    pub fn line_count(&self) -> usize {
        usize::from(self.polyline.is_some())
    }

    pub fn labels(&self) -> &[DistanceLabel] {
        &self.labels
    }

    /// Sum of the unrounded segment distances in meters
    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    pub fn is_empty(&self) -> bool {
        self.polyline.is_none() && self.labels.is_empty()
    }
}

/// Derives a [`PathOverlay`] from the points
#[derive(Debug, Clone, Copy, Default)]
pub struct PathRenderer {
    locale: UnitLocale,
}

impl PathRenderer {
    pub fn new(locale: UnitLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> UnitLocale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: UnitLocale) {
        self.locale = locale;
    }

    /// Pure and idempotent, rendering the same points twice gives equal overlays
    pub fn render(&self, points: &[LatLng]) -> PathOverlay {
        if points.len() < 2 {
            return PathOverlay::default();
        }

        let mut total_distance_m = 0.0;
        let labels: Vec<DistanceLabel> = segments(points)
            .map(|segment| {
                total_distance_m += segment.distance_m;
                DistanceLabel {
                    position: segment.midpoint(),
                    distance_m: segment.distance_m,
                    text: format_distance(segment.distance_m, self.locale),
                }
            })
            .collect();

        log::trace!(
            "Rendered path overlay: {} points, {} labels, {total_distance_m:.2} m",
            points.len(),
            labels.len()
        );

        PathOverlay {
            polyline: Some(points.to_vec()),
            labels,
            total_distance_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_test_util::{
        ONE_DEGREE_ARC_M, assert_distance_eq, equator_points, phitsanulok_walk,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fewer_than_two_points_is_empty() {
        let renderer = PathRenderer::default();
        assert!(renderer.render(&[]).is_empty());
        let single = renderer.render(&[LatLng::new(1.0, 1.0)]);
        assert!(single.is_empty());
        assert_eq!(single.total_distance_m(), 0.0);
    }

    #[test]
    fn test_collinear_total_is_sum_of_segments() {
        let overlay = PathRenderer::default().render(&equator_points());
        assert_eq!(overlay.labels().len(), 2);
        for label in overlay.labels() {
            assert_distance_eq(label.distance_m, ONE_DEGREE_ARC_M);
        }
        assert_distance_eq(overlay.total_distance_m(), 2.0 * ONE_DEGREE_ARC_M);
    }

    #[test]
    fn test_total_is_exact_sum_of_label_distances() {
        let overlay = PathRenderer::default().render(&phitsanulok_walk());
        let sum: f64 = overlay.labels().iter().map(|l| l.distance_m).sum();
        assert_eq!(overlay.total_distance_m(), sum);
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = PathRenderer::default();
        let walk = phitsanulok_walk();
        let first = renderer.render(&walk);
        for _ in 0..5 {
            let again = renderer.render(&walk);
            assert_eq!(again.line_count(), 1);
            assert_eq!(again.labels().len(), walk.len() - 1);
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_labels_at_midpoints_with_text() {
        let overlay = PathRenderer::new(UnitLocale::English).render(&equator_points());
        let label = &overlay.labels()[0];
        assert_eq!(label.position, LatLng::new(0.0, 0.5));
        assert_eq!(label.text, format!("{ONE_DEGREE_ARC_M:.2} m"));
    }

    #[test]
    fn test_polyline_follows_point_order() {
        let walk = phitsanulok_walk();
        let overlay = PathRenderer::default().render(&walk);
        assert_eq!(overlay.polyline(), Some(walk.as_slice()));
    }
}
