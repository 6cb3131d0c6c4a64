//! Everything adjustable about a postcard, as one immutable record.
//! Configs are RON files; any field left out takes its default.
use std::fs;
use std::path::Path;

pub use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ConfigError, NormalizeError};
use crate::normalize::{Alignment, DrawingRect};
use crate::page::PageSize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PenDetail {
    pub name: String,
    /// Line width in inches. Also the spacing of hatch fills.
    pub stroke_width: f64,
    pub color: CssColor,
}

impl Default for PenDetail {
    fn default() -> Self {
        Self {
            name: "Default Pen".to_string(),
            stroke_width: 0.01,
            color: CssColor::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl PenDetail {
    pub fn css_color(&self) -> String {
        self.color.to_css_hex()
    }
}

/// Font size and spacing for one block of text. Sizes are in inches.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub line_spacing: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PostcardConfig {
    /// Which recipient address to use.
    pub addr_id: usize,
    /// Only draw the address block, for cards with pre-printed artwork.
    pub address_only: bool,
    pub page_size: String,

    pub address: TextStyle,
    pub address_y_offset: f64,
    pub header: TextStyle,
    pub message: TextStyle,
    pub message_y_offset: f64,
    pub postcard_margin: f64,

    /// Draw the card frame and text, not just the route.
    pub draw_postcard: bool,
    pub postcard_origin: (f64, f64),

    pub map_padding: f64,
    pub alignment: Alignment,
    pub route_rect: (f64, f64),
    pub route_origin: (f64, f64),
    pub house_size: f64,

    pub pen: PenDetail,
    /// Merge and reorder strokes before writing.
    pub optimize: bool,
}

impl Default for PostcardConfig {
    fn default() -> Self {
        Self {
            addr_id: 0,
            address_only: false,
            page_size: "8.5inx10in".to_string(),
            address: TextStyle {
                font_size: 0.15,
                line_spacing: 1.2,
            },
            address_y_offset: 3.0,
            header: TextStyle {
                font_size: 0.15,
                line_spacing: 1.1,
            },
            message: TextStyle {
                font_size: 0.2,
                line_spacing: 1.2,
            },
            message_y_offset: 1.5,
            postcard_margin: 0.25,
            draw_postcard: false,
            postcard_origin: (0.0, 0.0),
            map_padding: 0.1,
            alignment: Alignment::Center,
            route_rect: (6.0, 4.0),
            route_origin: (0.0, 0.0),
            house_size: 0.15,
            pen: PenDetail::default(),
            optimize: true,
        }
    }
}

impl PostcardConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<PostcardConfig, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = PostcardConfig::from_ron(&text)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<PostcardConfig, ConfigError> {
        let config: PostcardConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn page(&self) -> Result<PageSize, ConfigError> {
        Ok(self.page_size.parse()?)
    }

    pub fn drawing_rect(&self) -> Result<DrawingRect, NormalizeError> {
        DrawingRect::new(
            self.route_rect.0,
            self.route_rect.1,
            self.map_padding,
            self.alignment,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.page()?;
        self.drawing_rect()
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if !(self.house_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "house_size must be positive, got {}",
                self.house_size
            )));
        }
        if !(self.pen.stroke_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pen stroke_width must be positive, got {}",
                self.pen.stroke_width
            )));
        }
        for (name, style) in [
            ("address", self.address),
            ("header", self.header),
            ("message", self.message),
        ] {
            if !(style.font_size > 0.0 && style.line_spacing > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} font size and line spacing must be positive",
                    name
                )));
            }
        }
        Ok(())
    }
}
