//! Serializers turning the path points into downloadable documents.
//!
//! All serializers are pure: they take the points in path order and return the
//! file contents. Delivering the bytes (save dialog, browser download) is up to the caller.

use geotrace_geo::LatLng;

pub mod error;
pub mod geojson;
pub mod gpx;
pub mod json;

pub use error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
pub enum ExportFormat {
    #[strum(to_string = "JSON")]
    Json,
    #[strum(to_string = "GPX")]
    Gpx,
    #[strum(to_string = "GeoJSON")]
    GeoJson,
}

impl ExportFormat {
    /// Fixed name of the downloaded file
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "points.json",
            Self::Gpx => "points.gpx",
            Self::GeoJson => "points.geojson",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Gpx => "gpx",
            Self::GeoJson => "geojson",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Gpx => "application/gpx+xml",
            Self::GeoJson => "application/geo+json",
        }
    }

    pub fn serialize(self, points: &[LatLng]) -> Result<String, ExportError> {
        let contents = match self {
            Self::Json => json::to_json(points)?,
            Self::Gpx => gpx::to_gpx(points)?,
            Self::GeoJson => geojson::to_geojson(points)?,
        };
        log::debug!(
            "Serialized {} points to {self} ({} bytes)",
            points.len(),
            contents.len()
        );
        Ok(contents)
    }

    /// Serialize and write to `path`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn write_file(
        self,
        points: &[LatLng],
        path: &std::path::Path,
    ) -> Result<(), ExportError> {
        let contents = self.serialize(points)?;
        std::fs::write(path, contents)?;
        log::info!("Saved {} points to {}", points.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator as _;

    #[test]
    fn test_file_names_match_extensions() {
        for format in ExportFormat::iter() {
            assert_eq!(
                format.file_name(),
                format!("points.{}", format.extension())
            );
        }
    }

    #[test]
    fn test_every_format_accepts_an_empty_path() {
        for format in ExportFormat::iter() {
            assert!(format.serialize(&[]).is_ok(), "{format} failed");
        }
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = ExportFormat::iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["JSON", "GPX", "GeoJSON"]);
    }
}
