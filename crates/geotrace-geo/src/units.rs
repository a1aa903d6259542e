use serde::{Deserialize, Serialize};

/// Language used for unit suffixes in labels and summaries
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum UnitLocale {
    #[default]
    #[strum(to_string = "English")]
    English,
    /// Needs a font with Thai glyphs to render
    #[strum(to_string = "Thai")]
    Thai,
}

impl UnitLocale {
    /// Short suffix for segment labels
    pub fn meter_short(self) -> &'static str {
        match self {
            Self::English => "m",
            Self::Thai => "ม.",
        }
    }

    /// Long form used in summaries and axis titles
    pub fn meter_long(self) -> &'static str {
        match self {
            Self::English => "m",
            Self::Thai => "เมตร",
        }
    }

    pub fn total_distance_caption(self) -> &'static str {
        match self {
            Self::English => "Total distance",
            Self::Thai => "ระยะทางรวม",
        }
    }

    pub fn elevation_caption(self) -> &'static str {
        match self {
            Self::English => "Elevation",
            Self::Thai => "ความสูง",
        }
    }

    pub fn distance_caption(self) -> &'static str {
        match self {
            Self::English => "Distance",
            Self::Thai => "ระยะทาง",
        }
    }

    pub fn latitude_caption(self) -> &'static str {
        match self {
            Self::English => "Lat",
            Self::Thai => "ละติจูด",
        }
    }

    pub fn longitude_caption(self) -> &'static str {
        match self {
            Self::English => "Lng",
            Self::Thai => "ลองจิจูด",
        }
    }
}

/// Format a distance in meters with 2 decimals and the short unit suffix, e.g. `1234.57 m`
pub fn format_distance(meters: f64, locale: UnitLocale) -> String {
    format!("{meters:.2} {}", locale.meter_short())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_distance_rounds_to_two_decimals() {
        assert_eq!(format_distance(1234.5678, UnitLocale::English), "1234.57 m");
        assert_eq!(format_distance(0.0, UnitLocale::English), "0.00 m");
    }

    #[test]
    fn test_format_distance_thai_suffix() {
        assert_eq!(format_distance(12.0, UnitLocale::Thai), "12.00 ม.");
    }
}
