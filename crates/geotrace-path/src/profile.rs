use geotrace_geo::LatLng;

use crate::Marker;

/// One point of the elevation profile, aligned by index with the path points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    /// Meters from the first point along the path (0 for the first point)
    pub cumulative_distance_m: f64,
    /// Meters, `None` while the lookup is pending or after it failed
    pub elevation_m: Option<f64>,
}

/// Summary of the resolved samples of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub min_elevation_m: f64,
    pub max_elevation_m: f64,
    pub total_ascent_m: f64,
    pub total_descent_m: f64,
}

/// Distance vs. elevation data for the chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElevationSeries {
    samples: Vec<ProfileSample>,
    /// Bumped on every refresh so surfaces know when to rebuild
    revision: u64,
}

impl ElevationSeries {
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(distance, elevation)` of every sample with a known elevation
    pub fn resolved(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .filter_map(|s| s.elevation_m.map(|e| (s.cumulative_distance_m, e)))
    }

    /// Stats over the resolved samples, `None` if no elevation is known yet.
    ///
    /// Ascent and descent are accumulated between consecutive resolved samples.
    pub fn stats(&self) -> Option<ProfileStats> {
        let mut resolved = self.resolved().map(|(_, e)| e);
        let first = resolved.next()?;
        let mut stats = ProfileStats {
            min_elevation_m: first,
            max_elevation_m: first,
            total_ascent_m: 0.0,
            total_descent_m: 0.0,
        };
        let mut prev = first;
        for e in resolved {
            stats.min_elevation_m = stats.min_elevation_m.min(e);
            stats.max_elevation_m = stats.max_elevation_m.max(e);
            let delta = e - prev;
            if delta > 0.0 {
                stats.total_ascent_m += delta;
            } else {
                stats.total_descent_m -= delta;
            }
            prev = e;
        }
        Some(stats)
    }
}

/// Owns the elevation series, created lazily on the first refresh
#[derive(Debug, Default)]
pub struct ElevationProfile {
    series: Option<ElevationSeries>,
}

impl ElevationProfile {
    /// Recompute the whole series from the points and the markers' elevations,
    /// replacing the previous data.
    pub fn refresh(&mut self, points: &[LatLng], markers: &[Marker]) {
        debug_assert_eq!(
            points.len(),
            markers.len(),
            "points and markers out of sync"
        );
        let series = self.series.get_or_insert_with(|| {
            log::debug!("Initializing elevation series");
            ElevationSeries::default()
        });

        series.samples.clear();
        let mut cumulative_distance_m = 0.0;
        for (i, (point, marker)) in points.iter().zip(markers).enumerate() {
            if i > 0 {
                cumulative_distance_m += points[i - 1].distance_to(point);
            }
            series.samples.push(ProfileSample {
                cumulative_distance_m,
                elevation_m: marker.elevation(),
            });
        }
        series.revision += 1;
    }

    pub fn series(&self) -> Option<&ElevationSeries> {
        self.series.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.series.is_some()
    }

    /// Number of samples currently in the series
    pub fn sample_count(&self) -> usize {
        self.series.as_ref().map_or(0, ElevationSeries::len)
    }
}
