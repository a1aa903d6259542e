use geotrace_geo::LatLng;

use crate::ExportError;

/// Pretty-printed array of `{ "lat": .., "lng": .. }` objects, indented by 2 spaces
pub fn to_json(points: &[LatLng]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_test_util::two_point_path;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn test_pretty_array_of_lat_lng() -> TestResult {
        let json = to_json(&two_point_path())?;
        assert_eq!(
            json,
            r#"[
  {
    "lat": 16.812032,
    "lng": 100.463233
  },
  {
    "lat": -33.86882,
    "lng": 151.20929
  }
]"#
        );
        Ok(())
    }

    #[test]
    fn test_empty_path() -> TestResult {
        assert_eq!(to_json(&[])?, "[]");
        Ok(())
    }

    #[test]
    fn test_parses_back_to_the_same_points() -> TestResult {
        let points = two_point_path();
        let parsed: Vec<LatLng> = serde_json::from_str(&to_json(&points)?)?;
        assert_eq!(parsed, points);
        Ok(())
    }
}
