//! Plotters can't fill, they can only draw lines. Filled polygons get
//! parallel hatch lines instead.
use geo::{BooleanOps, BoundingRect};
use geo_types::{coord, LineString, MultiLineString, Polygon, Rect};

/// Horizontal lines `spacing` apart covering `bbox`, alternating direction.
/// The first line sits half a spacing below the top edge. Lines overhang the
/// box by one spacing on each side so clipping never lands on an endpoint.
pub fn line_hatch(bbox: &Rect<f64>, spacing: f64) -> MultiLineString<f64> {
    let mut lines: Vec<LineString<f64>> = vec![];
    if spacing.is_nan() || spacing <= 0.0 {
        return MultiLineString::new(lines);
    }
    let (min, max) = (bbox.min(), bbox.max());
    let (left, right) = (min.x - spacing, max.x + spacing);
    let mut y = min.y + spacing / 2.0;
    let mut count = 0u32;
    while y < max.y {
        let (x0, x1) = if count % 2 == 0 {
            (left, right)
        } else {
            (right, left)
        };
        lines.push(LineString::new(vec![
            coord! {x: x0, y: y},
            coord! {x: x1, y: y},
        ]));
        y += spacing;
        count += 1;
    }
    MultiLineString::new(lines)
}

pub trait Hatch {
    /// Horizontal hatch lines `spacing` apart, clipped to the shape.
    fn hatch(&self, spacing: f64) -> MultiLineString<f64>;
}

impl Hatch for Polygon<f64> {
    fn hatch(&self, spacing: f64) -> MultiLineString<f64> {
        match self.bounding_rect() {
            Some(bbox) => self.clip(&line_hatch(&bbox, spacing), false),
            None => MultiLineString::new(vec![]),
        }
    }
}
