use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use geotrace_geo::LatLng;

use crate::ExportError;

/// Point feature at `[lng, lat]` with an empty properties object
fn point_feature(point: &LatLng) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![point.lng, point.lat]))),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    }
}

/// `FeatureCollection` with one `Point` feature per path point, pretty-printed
pub fn to_geojson(points: &[LatLng]) -> Result<String, ExportError> {
    let collection = FeatureCollection {
        bbox: None,
        features: points.iter().map(point_feature).collect(),
        foreign_members: None,
    };
    Ok(serde_json::to_string_pretty(&collection)?)
}
