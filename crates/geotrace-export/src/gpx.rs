use ::gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use geo_types::Point;
use geotrace_geo::LatLng;

use crate::ExportError;

pub const CREATOR: &str = "GeoTrace";

/// GPX 1.1 document with one track holding one segment, one track point per path point.
///
/// Track points carry coordinates only, no elevation or time.
pub fn to_gpx(points: &[LatLng]) -> Result<String, ExportError> {
    let mut segment = TrackSegment::new();
    segment.points = points
        .iter()
        .map(|p| Waypoint::new(Point::new(p.lng, p.lat)))
        .collect();

    let mut track = Track::new();
    track.segments.push(segment);

    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_owned()),
        ..Default::default()
    };
    gpx.tracks.push(track);

    let mut buf = Vec::new();
    ::gpx::write(&gpx, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_test_util::two_point_path;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn test_single_track_and_segment() -> TestResult {
        let points = two_point_path();
        let doc = to_gpx(&points)?;
        let parsed = ::gpx::read(doc.as_bytes())?;

        assert_eq!(parsed.version, GpxVersion::Gpx11);
        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(parsed.tracks[0].segments.len(), 1);

        let trkpts = &parsed.tracks[0].segments[0].points;
        assert_eq!(trkpts.len(), points.len());
        for (wpt, p) in trkpts.iter().zip(&points) {
            assert_eq!(wpt.point().y(), p.lat);
            assert_eq!(wpt.point().x(), p.lng);
            assert_eq!(wpt.elevation, None);
            assert!(wpt.time.is_none());
        }
        Ok(())
    }

    #[test]
    fn test_lat_lon_attributes() -> TestResult {
        let doc = to_gpx(&two_point_path())?;
        assert!(doc.contains(r#"lat="16.812032""#), "{doc}");
        assert!(doc.contains(r#"lon="100.463233""#), "{doc}");
        assert!(doc.contains(r#"creator="GeoTrace""#), "{doc}");
        Ok(())
    }

    #[test]
    fn test_empty_path_has_empty_segment() -> TestResult {
        let parsed = ::gpx::read(to_gpx(&[])?.as_bytes())?;
        assert_eq!(parsed.tracks.len(), 1);
        assert!(parsed.tracks[0].segments[0].points.is_empty());
        Ok(())
    }
}
