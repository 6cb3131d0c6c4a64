//! Fit a geographic [`Route`] into a rectangle on the page.
//!
//! The route is scaled uniformly (the tighter axis wins, so nothing is
//! distorted), placed inside the padded rectangle according to an
//! [`Alignment`], and flipped vertically so north ends up at the top of the
//! canvas, where y grows downward.
use std::fmt::{self, Display};
use std::str::FromStr;

use geo_types::{coord, Coord};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::errors::NormalizeError;
use crate::route::Route;

/// A position on the drawing plane. Origin is the top-left of the target
/// rectangle and y grows downward.
pub type DrawPoint = Coord<f64>;

/// Where the scaled drawing sits inside its padded rectangle. Written as
/// its kebab-case name in configs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Alignment {
    pub const ALL: [Alignment; 5] = [
        Alignment::Center,
        Alignment::TopLeft,
        Alignment::TopRight,
        Alignment::BottomLeft,
        Alignment::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Center => "center",
            Alignment::TopLeft => "top-left",
            Alignment::TopRight => "top-right",
            Alignment::BottomLeft => "bottom-left",
            Alignment::BottomRight => "bottom-right",
        }
    }

    /// Offsets of the drawing's origin from the rectangle origin, given the
    /// padding, the padded (effective) area and the scaled drawing size.
    fn offsets(&self, padding: f64, effective: (f64, f64), drawing: (f64, f64)) -> (f64, f64) {
        let slack_x = effective.0 - drawing.0;
        let slack_y = effective.1 - drawing.1;
        match self {
            Alignment::Center => (padding + slack_x / 2.0, padding + slack_y / 2.0),
            Alignment::TopLeft => (padding, padding),
            Alignment::TopRight => (padding + slack_x, padding),
            Alignment::BottomLeft => (padding, padding + slack_y),
            Alignment::BottomRight => (padding + slack_x, padding + slack_y),
        }
    }
}

impl FromStr for Alignment {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alignment::ALL
            .iter()
            .find(|a| a.as_str() == s)
            .copied()
            .ok_or_else(|| NormalizeError::InvalidAlignment(s.to_string()))
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Alignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Alignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// The region a route gets fitted into, in drawing units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawingRect {
    width: f64,
    height: f64,
    padding: f64,
    alignment: Alignment,
}

impl DrawingRect {
    pub fn new(
        width: f64,
        height: f64,
        padding: f64,
        alignment: Alignment,
    ) -> Result<DrawingRect, NormalizeError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(NormalizeError::InvalidRect(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(NormalizeError::InvalidRect(format!(
                "padding must be non-negative, got {}",
                padding
            )));
        }
        if 2.0 * padding >= width.min(height) {
            return Err(NormalizeError::InvalidRect(format!(
                "padding {} leaves no room in a {}x{} rect",
                padding, width, height
            )));
        }
        Ok(DrawingRect {
            width,
            height,
            padding,
            alignment,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Drawable size once padding is taken off both sides of each axis.
    pub fn effective_size(&self) -> (f64, f64) {
        (
            self.width - 2.0 * self.padding,
            self.height - 2.0 * self.padding,
        )
    }
}

/// A normalized route, along with the numbers used to place it.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub points: Vec<DrawPoint>,
    pub scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub drawing_width: f64,
    pub drawing_height: f64,
}

/// Map every point of `route` into `rect`.
///
/// When the route has zero extent on either axis (a single point, or a
/// perfectly straight north-south/east-west run) the scale falls back to 1 and
/// the drawing may overflow the rectangle along the non-degenerate axis.
pub fn normalize(route: &Route, rect: &DrawingRect) -> Normalized {
    let bounds = route.bounds();
    let (min_lon, min_lat) = (bounds.min().x, bounds.min().y);
    let lon_span = bounds.width();
    let lat_span = bounds.height();

    let effective = rect.effective_size();
    let scale = if lon_span > 0.0 && lat_span > 0.0 {
        f64::min(effective.0 / lon_span, effective.1 / lat_span)
    } else {
        debug!(
            "Degenerate route extent {}x{}, drawing unscaled",
            lon_span, lat_span
        );
        1.0
    };

    let drawing = (lon_span * scale, lat_span * scale);
    let (x_offset, y_offset) = rect.alignment.offsets(rect.padding, effective, drawing);

    let points = route
        .points()
        .iter()
        .map(|geo| {
            coord! {
                x: (geo.x - min_lon) * scale + x_offset,
                y: rect.height - ((geo.y - min_lat) * scale + y_offset),
            }
        })
        .collect();

    Normalized {
        points,
        scale,
        x_offset,
        y_offset,
        drawing_width: drawing.0,
        drawing_height: drawing.1,
    }
}

/// Convenience wrapper that takes the alignment by name.
pub fn normalize_coordinates(
    route: &Route,
    width: f64,
    height: f64,
    padding: f64,
    alignment: &str,
) -> Result<Vec<DrawPoint>, NormalizeError> {
    let rect = DrawingRect::new(width, height, padding, alignment.parse()?)?;
    Ok(normalize(route, &rect).points)
}

#[cfg(test)]
mod test {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn extent(points: &[DrawPoint]) -> (f64, f64, f64, f64) {
        points.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        )
    }

    fn zigzag() -> Route {
        Route::from_lon_lat(&[
            (-122.42, 37.77),
            (-122.40, 37.79),
            (-122.38, 37.76),
            (-122.35, 37.80),
        ])
        .unwrap()
    }

    #[test]
    fn test_alignment_parse() {
        for a in Alignment::ALL {
            assert_eq!(a.as_str().parse::<Alignment>().unwrap(), a);
        }
        assert!(matches!(
            "middle".parse::<Alignment>(),
            Err(NormalizeError::InvalidAlignment(_))
        ));
        assert!("Center".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_invalid_rect() {
        assert!(DrawingRect::new(0.0, 4.0, 0.1, Alignment::Center).is_err());
        assert!(DrawingRect::new(6.0, -1.0, 0.1, Alignment::Center).is_err());
        assert!(DrawingRect::new(6.0, 4.0, -0.1, Alignment::Center).is_err());
        assert!(DrawingRect::new(f64::NAN, 4.0, 0.1, Alignment::Center).is_err());
    }

    #[test]
    fn test_padding_must_leave_room() {
        assert!(matches!(
            DrawingRect::new(6.0, 4.0, 2.5, Alignment::TopLeft),
            Err(NormalizeError::InvalidRect(_))
        ));
        assert!(DrawingRect::new(6.0, 4.0, 2.0, Alignment::TopLeft).is_err());
        let rect = DrawingRect::new(6.0, 4.0, 1.9, Alignment::TopLeft).unwrap();
        // What is left is small but drawn the right way up.
        let route = Route::from_lon_lat(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let out = normalize(&route, &rect);
        assert!(out.scale > 0.0);
        assert!(out.points[1].x > out.points[0].x);
        assert!(out.points[1].y < out.points[0].y);
    }

    #[test]
    fn test_unknown_alignment_by_name() {
        let route = zigzag();
        assert!(matches!(
            normalize_coordinates(&route, 6.0, 4.0, 0.1, "left"),
            Err(NormalizeError::InvalidAlignment(_))
        ));
    }

    #[test]
    fn test_aspect_preserved() {
        let route = zigzag();
        let bounds = route.bounds();
        for alignment in Alignment::ALL {
            let rect = DrawingRect::new(6.0, 4.0, 0.1, alignment).unwrap();
            let out = normalize(&route, &rect);
            let (x0, y0, x1, y1) = extent(&out.points);
            let expected = bounds.width() / bounds.height();
            assert!(((x1 - x0) / (y1 - y0) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_contained_in_padded_rect() {
        let route = zigzag();
        for alignment in Alignment::ALL {
            let rect = DrawingRect::new(6.0, 4.0, 0.25, alignment).unwrap();
            let out = normalize(&route, &rect);
            for p in &out.points {
                assert!(p.x >= 0.25 - EPSILON && p.x <= 6.0 - 0.25 + EPSILON);
                assert!(p.y >= 0.25 - EPSILON && p.y <= 4.0 - 0.25 + EPSILON);
                assert!(p.x >= out.x_offset - EPSILON);
                assert!(p.x <= out.x_offset + out.drawing_width + EPSILON);
            }
        }
    }

    #[test]
    fn test_top_left_full_box() {
        // Spans 6x4 in lon/lat, so it fills the padded box exactly on both axes.
        let route = Route::from_lon_lat(&[(0.0, 0.0), (6.0, 4.0)]).unwrap();
        let rect = DrawingRect::new(6.0, 4.0, 0.1, Alignment::TopLeft).unwrap();
        let out = normalize(&route, &rect);
        let (x0, y0, _, _) = extent(&out.points);
        assert!(close(x0, 0.1));
        assert!(close(y0, 4.0 - (0.1 + out.drawing_height)));
    }

    #[test]
    fn test_scale_from_tighter_axis() {
        let route = Route::from_lon_lat(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
        let rect = DrawingRect::new(6.0, 4.0, 0.0, Alignment::Center).unwrap();
        let out = normalize(&route, &rect);
        assert_eq!(out.scale, 4.0);
        assert_eq!(out.points[1].x - out.points[0].x, 4.0);
        // North is up.
        assert!(out.points[2].y < out.points[0].y);
    }

    #[test]
    fn test_single_point() {
        let route = Route::from_lon_lat(&[(10.0, 20.0)]).unwrap();
        let rect = DrawingRect::new(6.0, 4.0, 0.1, Alignment::Center).unwrap();
        let out = normalize(&route, &rect);
        assert_eq!(out.points.len(), 1);
        assert_eq!(out.scale, 1.0);
        assert!(close(out.points[0].x, 3.0));
        assert!(close(out.points[0].y, 2.0));

        let rect = DrawingRect::new(6.0, 4.0, 0.1, Alignment::BottomRight).unwrap();
        let out = normalize(&route, &rect);
        assert!(close(out.points[0].x, 5.9));
        assert!(close(out.points[0].y, 0.1));
    }

    #[test]
    fn test_straight_line_is_unscaled() {
        let route = Route::from_lon_lat(&[(0.0, 5.0), (2.0, 5.0)]).unwrap();
        let rect = DrawingRect::new(6.0, 4.0, 0.0, Alignment::TopLeft).unwrap();
        let out = normalize(&route, &rect);
        assert_eq!(out.scale, 1.0);
        assert_eq!(out.points[1].x - out.points[0].x, 2.0);
    }

    #[test]
    fn test_corner_alignments() {
        let route = Route::from_lon_lat(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        // Square route in a wide box: 3.8 tall, so 3.8 wide with 2 units of slack in x.
        let place = |alignment| {
            let rect = DrawingRect::new(6.0, 4.0, 0.1, alignment).unwrap();
            let out = normalize(&route, &rect);
            (out.x_offset, out.y_offset)
        };
        let (x, y) = place(Alignment::TopLeft);
        assert!(close(x, 0.1) && close(y, 0.1));
        let (x, y) = place(Alignment::TopRight);
        assert!(close(x, 2.1) && close(y, 0.1));
        let (x, y) = place(Alignment::BottomLeft);
        assert!(close(x, 0.1) && close(y, 0.1));
        let (x, y) = place(Alignment::BottomRight);
        assert!(close(x, 2.1) && close(y, 0.1));
        let (x, y) = place(Alignment::Center);
        assert!(close(x, 1.1) && close(y, 0.1));
    }

    #[test]
    fn test_serde_names() {
        let a: Alignment = serde_json::from_str("\"bottom-left\"").unwrap();
        assert_eq!(a, Alignment::BottomLeft);
        assert_eq!(serde_json::to_string(&Alignment::TopRight).unwrap(), "\"top-right\"");
    }
}
