//! Draws a normalized route: a polyline through its points, and a little
//! house over the starting point.
use geo_types::coord;

use crate::canvas::Canvas;
use crate::errors::{PostcardError, RenderError};
use crate::normalize::{normalize, DrawPoint, DrawingRect};
use crate::route::Route;

/// Roof height as a fraction of the house size.
const ROOF_RATIO: f64 = 0.6;

/// Draw the house glyph with the middle of its base at `at`. The base is a
/// `size` square sitting above that point, with a roof on top.
pub fn draw_house<C: Canvas + ?Sized>(canvas: &mut C, at: DrawPoint, size: f64) {
    let (x, y) = (at.x, at.y);
    let half = size / 2.0;
    let roof_height = size * ROOF_RATIO;

    canvas.polygon(&[
        coord! {x: x - half, y: y},
        coord! {x: x + half, y: y},
        coord! {x: x + half, y: y - size},
        coord! {x: x - half, y: y - size},
        coord! {x: x - half, y: y},
    ]);
    canvas.polygon(&[
        coord! {x: x - half, y: y - size},
        coord! {x: x + half, y: y - size},
        coord! {x: x, y: y - size - roof_height},
        coord! {x: x - half, y: y - size},
    ]);
}

/// Draw `points` as an open polyline shifted by `origin`, then a filled house
/// at the first point. A single point gets only the house.
pub fn draw_route<C: Canvas + ?Sized>(
    canvas: &mut C,
    points: &[DrawPoint],
    origin: DrawPoint,
    house_size: f64,
) -> Result<(), RenderError> {
    let start = points.first().ok_or(RenderError::EmptyInput)?;
    let shifted: Vec<DrawPoint> = points.iter().map(|p| *p + origin).collect();

    for pair in shifted.windows(2) {
        canvas.line(pair[0], pair[1]);
    }

    let was_filled = canvas.is_filled();
    canvas.fill(true);
    draw_house(canvas, *start + origin, house_size);
    canvas.fill(was_filled);
    Ok(())
}

/// Normalize `route` into `rect`, then draw it with the rect's top-left
/// corner at `origin`.
pub fn render_route<C: Canvas + ?Sized>(
    canvas: &mut C,
    route: &Route,
    rect: &DrawingRect,
    origin: DrawPoint,
    house_size: f64,
) -> Result<(), PostcardError> {
    let normalized = normalize(route, rect);
    draw_route(canvas, &normalized.points, origin, house_size)?;
    Ok(())
}
