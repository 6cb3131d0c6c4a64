//! Route postcards for the pen plotter
//!
//! Takes a route as geographic coordinates (a directions response or plain
//! GeoJSON), squeezes it into a rectangle on the page without distorting it,
//! and draws it as a single line with a little house where the trip started.
//! Optionally the back of a 6×4 postcard goes on the same page: frame, stamp
//! box, return address, a message greeting the recipient by first name, and
//! their address.
//!
//! Output is SVG in inches, ready for [`vpype`] or straight to the plotter.
//!
//! [`vpype`]: https://vpype.readthedocs.io/en/latest/

/// Drawing surfaces: the [`canvas::Canvas`] trait, the SVG-producing
/// [`canvas::Sketch`], and a recording canvas for inspection.
pub mod canvas;

/// Everything adjustable, loaded from RON.
pub mod config;

pub mod errors;

/// Lon/lat to page coordinates.
pub mod normalize;

/// Stroke merging and ordering to cut pen-up travel.
pub mod optimizer;

pub mod page;

/// The postcard layout and its text.
pub mod postcard;

/// Polyline plus house glyph.
pub mod render;

/// Routes, and loading them from JSON.
pub mod route;

/// Just import prelude::* and go.
pub mod prelude {
    pub use crate::canvas::{Canvas, Recorder, Sketch, TextBlock};
    pub use crate::config::{PenDetail, PostcardConfig};
    pub use crate::errors::PostcardError;
    pub use crate::normalize::{normalize, normalize_coordinates, Alignment, DrawPoint, DrawingRect};
    pub use crate::page::PageSize;
    pub use crate::postcard::{draw_postcard, first_name, Content, PostcardSketch};
    pub use crate::render::{draw_house, draw_route, render_route};
    pub use crate::route::{load_route, Route, RouteSelector};
}
