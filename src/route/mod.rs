//! Routes are ordered runs of `(longitude, latitude)` pairs, kept as
//! [`geo_types::LineString`]s with `x` holding longitude and `y` latitude.
use geo::BoundingRect;
use geo_types::{coord, Coord, LineString, Rect};

use crate::errors::RouteError;

pub mod loader;

pub use loader::{load_route, RouteSelector};

/// A single geographic position. `x` is longitude, `y` is latitude.
/// Values are not range checked.
pub type GeoPoint = Coord<f64>;

/// An immutable, non-empty path to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    name: Option<String>,
    points: LineString<f64>,
}

impl Route {
    pub fn new(points: Vec<GeoPoint>) -> Result<Route, RouteError> {
        if points.is_empty() {
            return Err(RouteError::EmptyRoute);
        }
        Ok(Route {
            name: None,
            points: LineString::new(points),
        })
    }

    /// Builds a route from `(lon, lat)` tuples.
    pub fn from_lon_lat(pairs: &[(f64, f64)]) -> Result<Route, RouteError> {
        Route::new(
            pairs
                .iter()
                .map(|(lon, lat)| coord! {x: *lon, y: *lat})
                .collect(),
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points.0
    }

    pub fn len(&self) -> usize {
        self.points.0.len()
    }

    /// Never true for a constructed route.
    pub fn is_empty(&self) -> bool {
        self.points.0.is_empty()
    }

    pub fn as_line_string(&self) -> &LineString<f64> {
        &self.points
    }

    /// Longitude/latitude extent of the route.
    pub fn bounds(&self) -> Rect<f64> {
        // Non-empty by construction, so the fallback is never taken.
        self.points
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(self.points.0[0], self.points.0[0]))
    }
}
