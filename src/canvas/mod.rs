//! The drawing surface capability. Anything that can draw lines, closed
//! polygons and text blocks, with a fill toggle, can host the route renderer
//! and the postcard layout.
//!
//! Two surfaces ship here: [`Sketch`], which accumulates plotter-ready
//! geometry and writes SVG, and [`Recorder`], which just remembers what it
//! was asked to draw.
use geo_types::coord;

use crate::normalize::DrawPoint;

pub mod hatch;
pub mod record;
pub mod sketch;
pub mod svg;

pub use record::{Primitive, Recorder};
pub use sketch::Sketch;

pub trait Canvas {
    /// A single straight segment.
    fn line(&mut self, from: DrawPoint, to: DrawPoint) -> &mut Self;

    /// A closed polygon outline, filled if the fill state is on. The ring
    /// is closed for you when the last point differs from the first.
    fn polygon(&mut self, points: &[DrawPoint]) -> &mut Self;

    /// Turn filling of subsequent polygons on or off.
    fn fill(&mut self, fill: bool) -> &mut Self;

    fn is_filled(&self) -> bool;

    fn text(&mut self, block: &TextBlock) -> &mut Self;

    /// Axis aligned rectangle with its top-left corner at `x`,`y`.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.polygon(&[
            coord! {x: x, y: y},
            coord! {x: x + width, y: y},
            coord! {x: x + width, y: y + height},
            coord! {x: x, y: y + height},
            coord! {x: x, y: y},
        ])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FontFamily {
    Sans,
    Cursive,
}

impl FontFamily {
    pub fn css_name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "sans-serif",
            FontFamily::Cursive => "cursive",
        }
    }
}

/// A block of text. `x`,`y` is the baseline start of the first line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub line_spacing: f64,
    pub width: Option<f64>,
    pub font: FontFamily,
}

/// Rough advance of an average glyph, in ems, used for wrapping only.
const AVERAGE_ADVANCE_EM: f64 = 0.5;

impl TextBlock {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        TextBlock {
            text: text.into(),
            x,
            y,
            size: 0.15,
            line_spacing: 1.2,
            width: None,
            font: FontFamily::Sans,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn font(mut self, font: FontFamily) -> Self {
        self.font = font;
        self
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f64 {
        self.size * self.line_spacing
    }

    /// Split into display lines, wrapping on whitespace when a width is set.
    /// Explicit newlines are kept, including blank lines.
    pub fn lines(&self) -> Vec<String> {
        let max_chars = self
            .width
            .map(|w| ((w / (self.size * AVERAGE_ADVANCE_EM)).floor() as usize).max(1));
        let mut out = vec![];
        for raw in self.text.lines() {
            let max_chars = match max_chars {
                Some(max) if raw.chars().count() > max => max,
                _ => {
                    out.push(raw.to_string());
                    continue;
                }
            };
            let mut current = String::new();
            for word in raw.split_whitespace() {
                let needed = current.chars().count() + word.chars().count() + 1;
                if !current.is_empty() && needed > max_chars {
                    out.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
            out.push(current);
        }
        out
    }
}
