use std::fmt;

use serde::{Deserialize, Serialize};

pub mod bounds;
pub mod distance;
pub mod units;

pub use bounds::BoundingBox;
pub use distance::{EARTH_RADIUS_M, haversine_distance, midpoint};
pub use units::{UnitLocale, format_distance};

/// A latitude/longitude pair in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Distance in meters to `other`, see [`haversine_distance`]
    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance(self, other)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    /// 6 decimals, the precision used for display and for elevation lookups
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    /// From a `(lat, lng)` tuple
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
