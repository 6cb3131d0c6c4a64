use super::{Canvas, TextBlock};
use crate::normalize::DrawPoint;

/// One call made against a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line(DrawPoint, DrawPoint),
    Polygon { points: Vec<DrawPoint>, filled: bool },
    Fill(bool),
    Text(TextBlock),
}

/// A canvas that draws nothing and keeps every primitive, in call order.
/// Handy for tests, and for feeding a backend this crate doesn't know about.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    primitives: Vec<Primitive>,
    filled: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    pub fn lines(&self) -> impl Iterator<Item = (&DrawPoint, &DrawPoint)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(a, b) => Some((a, b)),
            _ => None,
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Vec<DrawPoint>> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Polygon { points, .. } => Some(points),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
    fn line(&mut self, from: DrawPoint, to: DrawPoint) -> &mut Self {
        self.primitives.push(Primitive::Line(from, to));
        self
    }

    fn polygon(&mut self, points: &[DrawPoint]) -> &mut Self {
        self.primitives.push(Primitive::Polygon {
            points: points.to_vec(),
            filled: self.filled,
        });
        self
    }

    fn fill(&mut self, fill: bool) -> &mut Self {
        self.filled = fill;
        self.primitives.push(Primitive::Fill(fill));
        self
    }

    fn is_filled(&self) -> bool {
        self.filled
    }

    fn text(&mut self, block: &TextBlock) -> &mut Self {
        self.primitives.push(Primitive::Text(block.clone()));
        self
    }
}
