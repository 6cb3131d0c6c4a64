//! Provides [`Sketch`], a canvas-style drawing surface which collects
//! everything drawn on it as geometry and turns it into plotter-ready SVG.
use std::path::Path;

use geo::MapCoords;
use geo_types::{coord, Coord, Geometry, LineString, MultiLineString, Polygon};
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};
use svg::Document;
use tracing::info;

use super::hatch::Hatch;
use super::svg::{page_document, text_elements, ToSvg};
use super::{Canvas, TextBlock};
use crate::errors::SketchError;
use crate::normalize::DrawPoint;
use crate::optimizer::Optimizer;
use crate::page::PageSize;

/// The drawing state captured by every operation, and saved by `push`.
#[derive(Clone, Debug, PartialEq)]
struct SketchState {
    transformation: Option<Affine2<f64>>,
    stroke_color: String,
    pen_width: f64,
    filled: bool,
}

/// A single drawn item, with its geometry already transformed and turned
/// into strokes (outlines plus any hatching).
#[derive(Clone, Debug)]
pub struct Operation {
    pub(crate) content: Geometry<f64>,
    pub(crate) strokes: MultiLineString<f64>,
    pub(crate) stroke_color: String,
    pub(crate) pen_width: f64,
}

impl Operation {
    fn render(content: Geometry<f64>, state: &SketchState) -> Operation {
        let mut strokes = MultiLineString::new(vec![]);
        match &content {
            Geometry::LineString(ls) => strokes.0.push(ls.clone()),
            Geometry::Polygon(poly) => {
                strokes.0.push(poly.exterior().clone());
                strokes.0.extend(poly.interiors().iter().cloned());
                if state.filled {
                    strokes.0.extend(poly.hatch(state.pen_width));
                }
            }
            _ => {}
        }
        Operation {
            content,
            strokes,
            stroke_color: state.stroke_color.clone(),
            pen_width: state.pen_width,
        }
    }

    /// The drawn geometry, after transformation.
    pub fn content(&self) -> &Geometry<f64> {
        &self.content
    }

    pub fn strokes(&self) -> &MultiLineString<f64> {
        &self.strokes
    }

    /// Operations that can share one SVG path.
    pub fn consistent(&self, other: &Operation) -> bool {
        self.stroke_color == other.stroke_color && self.pen_width == other.pen_width
    }
}

/// Consecutive operations sharing a pen, ready to be written as one path.
#[derive(Clone, Debug)]
pub struct Layer {
    pub stroke: String,
    pub stroke_width: f64,
    pub lines: MultiLineString<f64>,
}

/// # Sketch
///
/// A drawing surface sized to a page, in inches. Drawing calls are chainable
/// and pick up the current stroke color, pen width, fill state and
/// transformation. Filled polygons are hatched with lines one pen width
/// apart, since a plotter has no other way to fill.
///
/// ```rust
/// use plotty_postcard::canvas::{Canvas, Sketch};
/// use plotty_postcard::page::PageSize;
///
/// let mut sketch = Sketch::new(PageSize::new(6.0, 4.0));
/// sketch
///     .stroke("navy")
///     .pen(0.02)
///     .rect(0.0, 0.0, 6.0, 4.0)
///     .push()
///     .transform(Some(&Sketch::translate_matrix(1.0, 1.0)))
///     .fill(true)
///     .rect(0.0, 0.0, 0.5, 0.5)
///     .pop()
///     .unwrap();
/// let svg = sketch.to_svg().unwrap();
/// assert!(svg.to_string().contains("stroke=\"navy\""));
/// ```
#[derive(Clone, Debug)]
pub struct Sketch {
    page: PageSize,
    operations: Vec<Operation>,
    texts: Vec<TextBlock>,
    state: SketchState,
    stack: Vec<SketchState>,
    optimize: bool,
}

impl Sketch {
    pub fn new(page: PageSize) -> Sketch {
        Sketch {
            page,
            operations: vec![],
            texts: vec![],
            state: SketchState {
                transformation: None,
                stroke_color: "black".to_string(),
                pen_width: 0.01,
                filled: false,
            },
            stack: vec![],
            optimize: true,
        }
    }

    pub fn page(&self) -> &PageSize {
        &self.page
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn texts(&self) -> &[TextBlock] {
        &self.texts
    }

    /// Helper to create a translation matrix
    pub fn translate_matrix(tx: f64, ty: f64) -> Affine2<f64> {
        Affine2::from_matrix_unchecked(Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0))
    }

    /// Helper to create a scaling matrix
    pub fn scale_matrix(sx: f64, sy: f64) -> Affine2<f64> {
        Affine2::from_matrix_unchecked(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
    }

    pub fn unit_matrix() -> Affine2<f64> {
        Affine2::identity()
    }

    /// Sets the stroke color. Any CSS color string works.
    pub fn stroke(&mut self, color: &str) -> &mut Self {
        self.state.stroke_color = color.to_string();
        self
    }

    /// Sets the pen width, which is also the hatch spacing for fills.
    pub fn pen(&mut self, width: f64) -> &mut Self {
        self.state.pen_width = width;
        self
    }

    /// Toggle stroke merging and ordering at SVG generation time.
    pub fn optimize(&mut self, optimize: bool) -> &mut Self {
        self.optimize = optimize;
        self
    }

    /// Set the transformation for subsequent operations, or clear it.
    pub fn transform(&mut self, transformation: Option<&Affine2<f64>>) -> &mut Self {
        self.state.transformation = transformation.cloned();
        self
    }

    /// Compose `transformation` onto the current one. The new transform is
    /// applied after the existing one.
    pub fn mul_transform(&mut self, transformation: &Affine2<f64>) -> &mut Self {
        let base = self
            .state
            .transformation
            .clone()
            .unwrap_or_else(Sketch::unit_matrix);
        self.state.transformation = Some(transformation * base);
        self
    }

    /// Saves the current drawing state.
    pub fn push(&mut self) -> &mut Self {
        self.stack.push(self.state.clone());
        self
    }

    /// Restores the last saved drawing state.
    pub fn pop(&mut self) -> Result<&mut Self, SketchError> {
        self.state = self.stack.pop().ok_or(SketchError::PoppedEmptyStack)?;
        Ok(self)
    }

    fn xform_coord(xy: Coord<f64>, affine: &Affine2<f64>) -> Coord<f64> {
        let out = affine * NPoint2::new(xy.x, xy.y);
        coord! {x: out.x, y: out.y}
    }

    fn add_operation(&mut self, geometry: Geometry<f64>) {
        let geometry = match &self.state.transformation {
            Some(affine) => geometry.map_coords(|xy| Sketch::xform_coord(xy, affine)),
            None => geometry,
        };
        self.operations.push(Operation::render(geometry, &self.state));
    }

    /// Group consecutive operations drawn with the same pen.
    pub fn to_layers(&self) -> Vec<Layer> {
        let mut layers: Vec<Layer> = vec![];
        let mut last: Option<&Operation> = None;
        for op in &self.operations {
            match (last, layers.last_mut()) {
                (Some(prev), Some(layer)) if prev.consistent(op) => {
                    layer.lines.0.extend(op.strokes.0.iter().cloned());
                }
                _ => layers.push(Layer {
                    stroke: op.stroke_color.clone(),
                    stroke_width: op.pen_width,
                    lines: op.strokes.clone(),
                }),
            }
            last = Some(op);
        }
        layers
    }

    /// Build the SVG document: one path per layer, then the text.
    pub fn to_svg(&self) -> Result<Document, SketchError> {
        if !(self.page.width > 0.0 && self.page.height > 0.0) {
            return Err(SketchError::SvgGenerationError(format!(
                "page has no area: {}",
                self.page
            )));
        }
        let mut svg = page_document(&self.page);
        for (id, layer) in self.to_layers().into_iter().enumerate() {
            let lines = if self.optimize {
                Optimizer::new(layer.stroke_width / 2.0).run(&layer.lines)
            } else {
                layer.lines
            };
            if lines.0.is_empty() {
                continue;
            }
            svg = svg.add(
                lines
                    .to_path()
                    .set("id", format!("layer-{}", id))
                    .set("fill", "none")
                    .set("stroke", layer.stroke)
                    .set("stroke-width", layer.stroke_width)
                    .set("stroke-linejoin", "round")
                    .set("stroke-linecap", "round"),
            );
        }
        for block in &self.texts {
            for element in text_elements(block) {
                svg = svg.add(element);
            }
        }
        Ok(svg)
    }

    /// Write the SVG to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SketchError> {
        let document = self.to_svg()?;
        svg::save(path.as_ref(), &document)?;
        info!(
            "Wrote {} operations and {} text blocks to {}",
            self.operations.len(),
            self.texts.len(),
            path.as_ref().display()
        );
        Ok(())
    }
}

impl Canvas for Sketch {
    fn line(&mut self, from: DrawPoint, to: DrawPoint) -> &mut Self {
        self.add_operation(Geometry::LineString(LineString::new(vec![from, to])));
        self
    }

    fn polygon(&mut self, points: &[DrawPoint]) -> &mut Self {
        if points.len() < 3 {
            return self;
        }
        // Polygon::new closes the ring if it is open.
        self.add_operation(Geometry::Polygon(Polygon::new(
            LineString::new(points.to_vec()),
            vec![],
        )));
        self
    }

    fn fill(&mut self, fill: bool) -> &mut Self {
        self.state.filled = fill;
        self
    }

    fn is_filled(&self) -> bool {
        self.state.filled
    }

    fn text(&mut self, block: &TextBlock) -> &mut Self {
        let mut block = block.clone();
        if let Some(affine) = &self.state.transformation {
            let at = Sketch::xform_coord(coord! {x: block.x, y: block.y}, affine);
            block.x = at.x;
            block.y = at.y;
        }
        self.texts.push(block);
        self
    }
}
