//! The 6×4 inch postcard: frame, stamp box, divider, return address,
//! message and recipient, plus the whole-page sketch that puts a route and
//! the card together.
use geo_types::coord;
use tracing::{debug, info};

use crate::canvas::{Canvas, FontFamily, Sketch, TextBlock};
use crate::config::PostcardConfig;
use crate::errors::PostcardError;
use crate::normalize::DrawPoint;
use crate::render::render_route;
use crate::route::Route;

pub mod content;
pub mod names;

pub use content::Content;
pub use names::first_name;

pub const CARD_WIDTH: f64 = 6.0;
pub const CARD_HEIGHT: f64 = 4.0;
pub const STAMP_WIDTH: f64 = 0.87;
pub const STAMP_HEIGHT: f64 = 0.98;
/// x of the line between message and address halves.
pub const DIVIDER_X: f64 = 3.5;
pub const ADDRESS_X: f64 = 4.0;

const HEADER_DROP: f64 = 0.1;
const HEADER_WIDTH: f64 = 7.0;
const MESSAGE_WIDTH: f64 = 7.0;
const ADDRESS_WIDTH: f64 = 5.8;

/// Draw the card with its top-left corner at `origin`. With `address_only`
/// set only the recipient's address is drawn.
pub fn draw_postcard<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &PostcardConfig,
    content: &Content,
    origin: DrawPoint,
) -> Result<(), PostcardError> {
    let address = content.address(config.addr_id)?;
    let (x, y) = (origin.x, origin.y);
    let margin = config.postcard_margin;

    if !config.address_only {
        let message = content.message_for(address)?;
        canvas
            .rect(x, y, CARD_WIDTH, CARD_HEIGHT)
            .rect(
                x + CARD_WIDTH - STAMP_WIDTH - margin,
                y + margin,
                STAMP_WIDTH,
                STAMP_HEIGHT,
            )
            .line(
                coord! {x: x + DIVIDER_X, y: y + margin},
                coord! {x: x + DIVIDER_X, y: y + CARD_HEIGHT - margin},
            )
            .text(
                &TextBlock::new(content.header.as_str(), x + margin, y + margin + HEADER_DROP)
                    .width(HEADER_WIDTH)
                    .size(config.header.font_size)
                    .line_spacing(config.header.line_spacing),
            )
            .text(
                &TextBlock::new(message, x + margin, y + config.message_y_offset)
                    .width(MESSAGE_WIDTH)
                    .size(config.message.font_size)
                    .line_spacing(config.message.line_spacing)
                    .font(FontFamily::Cursive),
            );
    }

    canvas.text(
        &TextBlock::new(address, x + ADDRESS_X, y + config.address_y_offset)
            .width(ADDRESS_WIDTH)
            .size(config.address.font_size)
            .line_spacing(config.address.line_spacing),
    );
    debug!("Drew postcard for address {}", config.addr_id);
    Ok(())
}

/// A whole page: the route in its rectangle, and optionally the postcard.
#[derive(Clone, Debug)]
pub struct PostcardSketch {
    pub config: PostcardConfig,
    pub content: Content,
}

impl PostcardSketch {
    pub fn new(config: PostcardConfig, content: Content) -> PostcardSketch {
        PostcardSketch { config, content }
    }

    pub fn draw(&self, route: Option<&Route>) -> Result<Sketch, PostcardError> {
        let config = &self.config;
        let mut sketch = Sketch::new(config.page()?);
        sketch
            .stroke(&config.pen.css_color())
            .pen(config.pen.stroke_width)
            .optimize(config.optimize);

        if let Some(route) = route {
            let rect = config.drawing_rect()?;
            let (ox, oy) = config.route_origin;
            info!(
                "Drawing {} points of route {} aligned {}",
                route.len(),
                route.name().unwrap_or("<unnamed>"),
                rect.alignment()
            );
            render_route(&mut sketch, route, &rect, coord! {x: ox, y: oy}, config.house_size)?;
        }

        if config.draw_postcard {
            let (px, py) = config.postcard_origin;
            sketch.fill(false);
            draw_postcard(&mut sketch, config, &self.content, coord! {x: px, y: py})?;
        }
        Ok(sketch)
    }
}
