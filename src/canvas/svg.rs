use geo_types::MultiLineString;
use svg::node::element::path::Data;
use svg::node::element::{Path, Text};
use svg::Document;

use super::TextBlock;
use crate::page::PageSize;

/// A blank document covering the page, in inches.
pub fn page_document(page: &PageSize) -> Document {
    Document::new()
        .set("viewBox", (0.0, 0.0, page.width, page.height))
        .set("width", format!("{}in", page.width))
        .set("height", format!("{}in", page.height))
}

pub trait ToSvg {
    /// Convert the geometry into SVG path data.
    fn to_path_data(&self) -> Data;

    /// Convert the geometry into an unstyled SVG path.
    fn to_path(&self) -> Path {
        Path::new().set("d", self.to_path_data())
    }
}

impl ToSvg for MultiLineString<f64> {
    fn to_path_data(&self) -> Data {
        let mut svg_data = Data::new();
        for line in self {
            let mut coords = line.coords();
            if let Some(first) = coords.next() {
                svg_data = svg_data.move_to((first.x, first.y));
            }
            for coord in coords {
                svg_data = svg_data.line_to((coord.x, coord.y));
            }
        }
        svg_data
    }
}

/// One `<text>` element per display line, baselines `line_height` apart.
pub fn text_elements(block: &TextBlock) -> Vec<Text> {
    block
        .lines()
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            Text::new(line)
                .set("x", block.x)
                .set("y", block.y + i as f64 * block.line_height())
                .set("font-size", block.size)
                .set("font-family", block.font.css_name())
        })
        .collect()
}
