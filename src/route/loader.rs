//! Reads routes out of JSON files. Two shapes are understood: a directions
//! response (`{"routes": [{"geometry": ...}]}`) and plain GeoJSON.
use std::fmt::{self, Display};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use geo_types::coord;
use geojson::{GeoJson, Geometry, Value};
use serde::Deserialize;
use tracing::{debug, info};

use super::{GeoPoint, Route};
use crate::errors::RouteError;

/// Which route to pull out of a file holding several.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteSelector {
    Index(usize),
    Name(String),
}

impl Default for RouteSelector {
    fn default() -> Self {
        RouteSelector::Index(0)
    }
}

impl Display for RouteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSelector::Index(i) => write!(f, "index {}", i),
            RouteSelector::Name(name) => write!(f, "name '{}'", name),
        }
    }
}

#[derive(Deserialize)]
struct DirectionsDocument {
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    name: Option<String>,
    geometry: Geometry,
}

/// A candidate route before its geometry is turned into points.
struct NamedGeometry {
    name: Option<String>,
    geometry: Geometry,
}

/// Load a route from `path`. Any failure is fatal to the caller; nothing is
/// partially returned.
pub fn load_route(path: impl AsRef<Path>, selector: &RouteSelector) -> Result<Route, RouteError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => RouteError::FileNotFound(path.to_path_buf()),
        _ => RouteError::Io(err),
    })?;
    let route = parse_route(&text, selector)?;
    info!(
        "Loaded route {} with {} points from {}",
        route.name().unwrap_or("<unnamed>"),
        route.len(),
        path.display()
    );
    Ok(route)
}

/// Parse a route out of a JSON document already in memory.
pub fn parse_route(text: &str, selector: &RouteSelector) -> Result<Route, RouteError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let candidates = if value.get("routes").is_some() {
        let doc: DirectionsDocument = serde_json::from_value(value)?;
        debug!("Directions document with {} routes", doc.routes.len());
        doc.routes
            .into_iter()
            .map(|r| NamedGeometry {
                name: r.name,
                geometry: r.geometry,
            })
            .collect()
    } else {
        geojson_candidates(serde_json::from_value(value)?)
    };

    let chosen = select(candidates, selector)?;
    let points = geometry_points(&chosen.geometry)?;
    let route = Route::new(points)?;
    Ok(match chosen.name {
        Some(name) => route.with_name(name),
        None => route,
    })
}

fn geojson_candidates(geojson: GeoJson) -> Vec<NamedGeometry> {
    match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let name = feature
                    .property("name")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                feature
                    .geometry
                    .map(|geometry| NamedGeometry { name, geometry })
            })
            .collect(),
        GeoJson::Feature(feature) => {
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            feature
                .geometry
                .map(|geometry| NamedGeometry { name, geometry })
                .into_iter()
                .collect()
        }
        GeoJson::Geometry(geometry) => vec![NamedGeometry {
            name: None,
            geometry,
        }],
    }
}

fn select(
    candidates: Vec<NamedGeometry>,
    selector: &RouteSelector,
) -> Result<NamedGeometry, RouteError> {
    let found = match selector {
        RouteSelector::Index(i) => candidates.into_iter().nth(*i),
        RouteSelector::Name(name) => candidates
            .into_iter()
            .find(|c| c.name.as_deref() == Some(name.as_str())),
    };
    found.ok_or_else(|| RouteError::RouteNotFound(selector.to_string()))
}

fn geometry_points(geometry: &Geometry) -> Result<Vec<GeoPoint>, RouteError> {
    let positions: Vec<&Vec<f64>> = match &geometry.value {
        Value::LineString(positions) => positions.iter().collect(),
        Value::MultiLineString(parts) => parts.iter().flatten().collect(),
        other => return Err(RouteError::UnsupportedGeometry(kind(other).to_string())),
    };
    positions
        .iter()
        .enumerate()
        .map(|(i, pos)| match pos.as_slice() {
            [lon, lat, ..] => Ok(coord! {x: *lon, y: *lat}),
            _ => Err(RouteError::InvalidPosition(i)),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    const DIRECTIONS: &str = r#"{
        "code": "Ok",
        "routes": [
            {"geometry": {"type": "LineString", "coordinates": [[-122.4, 37.8], [-122.3, 37.7], [-122.2, 37.9]]}},
            {"name": "scenic", "geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]}}
        ]
    }"#;

    #[test]
    fn test_directions_first_route() {
        let route = parse_route(DIRECTIONS, &RouteSelector::Index(0)).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route.points()[0], coord! {x: -122.4, y: 37.8});
        assert_eq!(route.name(), None);
    }

    #[test]
    fn test_directions_by_name() {
        let route = parse_route(DIRECTIONS, &RouteSelector::Name("scenic".into())).unwrap();
        assert_eq!(route.points(), &[coord! {x: 1.0, y: 2.0}, coord! {x: 3.0, y: 4.0}]);
        assert_eq!(route.name(), Some("scenic"));
    }

    #[test]
    fn test_missing_route() {
        let err = parse_route(DIRECTIONS, &RouteSelector::Index(5)).unwrap_err();
        assert!(matches!(err, RouteError::RouteNotFound(_)));
        let err = parse_route(DIRECTIONS, &RouteSelector::Name("nope".into())).unwrap_err();
        assert!(matches!(err, RouteError::RouteNotFound(_)));
    }

    #[test]
    fn test_feature_collection() {
        let doc = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"name": "walk"},
             "geometry": {"type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3, 100]]]}}
        ]}"#;
        let route = parse_route(doc, &RouteSelector::Name("walk".into())).unwrap();
        assert_eq!(route.len(), 4);
        assert_eq!(route.points()[3], coord! {x: 3.0, y: 3.0});
    }

    #[test]
    fn test_bare_geometry() {
        let doc = r#"{"type": "LineString", "coordinates": [[5.0, 6.0]]}"#;
        let route = parse_route(doc, &RouteSelector::default()).unwrap();
        assert_eq!(route.len(), 1);
    }

    #[test]
    fn test_unsupported_geometry() {
        let doc = r#"{"type": "Point", "coordinates": [5.0, 6.0]}"#;
        let err = parse_route(doc, &RouteSelector::default()).unwrap_err();
        assert!(matches!(err, RouteError::UnsupportedGeometry(_)));
    }

    #[test]
    fn test_empty_coordinates() {
        let doc = r#"{"routes": [{"geometry": {"type": "LineString", "coordinates": []}}]}"#;
        let err = parse_route(doc, &RouteSelector::default()).unwrap_err();
        assert!(matches!(err, RouteError::EmptyRoute));
    }

    #[test]
    fn test_short_position() {
        let doc = r#"{"type": "LineString", "coordinates": [[0.0, 0.0], [1.0]]}"#;
        let err = parse_route(doc, &RouteSelector::default()).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPosition(1)));
    }

    #[test]
    fn test_malformed() {
        let err = parse_route("{ not json", &RouteSelector::default()).unwrap_err();
        assert!(matches!(err, RouteError::Parse(_)));
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_route(dir.path().join("missing.geojson"), &RouteSelector::default())
            .unwrap_err();
        assert!(matches!(err, RouteError::FileNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.geojson");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(DIRECTIONS.as_bytes()).unwrap();
        let route = load_route(&path, &RouteSelector::Index(1)).unwrap();
        assert_eq!(route.len(), 2);
    }
}
