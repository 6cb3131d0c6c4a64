//! Paper sizes, in inches.
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PageSizeError;

pub const MM_PER_INCH: f64 = 25.4;
pub const PX_PER_INCH: f64 = 96.0;

/// Named formats, portrait, as (name, width, height) in millimeters.
const NAMED_MM: &[(&str, f64, f64)] = &[
    ("a6", 105.0, 148.0),
    ("a5", 148.0, 210.0),
    ("a4", 210.0, 297.0),
    ("a3", 297.0, 420.0),
    ("a2", 420.0, 594.0),
    ("letter", 215.9, 279.4),
    ("legal", 215.9, 355.6),
    ("executive", 184.15, 266.7),
    ("tabloid", 279.4, 431.8),
    ("postcard", 152.4, 101.6),
];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        PageSize { width, height }
    }

    pub fn landscape(&self) -> Self {
        if self.width >= self.height {
            *self
        } else {
            PageSize::new(self.height, self.width)
        }
    }

    pub fn portrait(&self) -> Self {
        if self.height >= self.width {
            *self
        } else {
            PageSize::new(self.height, self.width)
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::new(8.5, 10.0)
    }
}

/// Convert a length such as `8.5in`, `210mm`, `2.5cm` or `300px` (bare
/// numbers are pixels) into inches.
pub fn parse_length(text: &str) -> Result<f64, PageSizeError> {
    let text = text.trim();
    let split = text
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| PageSizeError::UnknownPageSize(text.to_string()))?;
    let per_inch = match unit.trim() {
        "in" => 1.0,
        "mm" => MM_PER_INCH,
        "cm" => MM_PER_INCH / 10.0,
        "" | "px" => PX_PER_INCH,
        other => return Err(PageSizeError::UnknownUnit(other.to_string())),
    };
    Ok(value / per_inch)
}

impl FromStr for PageSize {
    type Err = PageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Some((_, w, h)) = NAMED_MM.iter().find(|(name, _, _)| *name == key) {
            return Ok(PageSize::new(w / MM_PER_INCH, h / MM_PER_INCH));
        }
        match key.split_once('x') {
            Some((w, h)) => Ok(PageSize::new(parse_length(w)?, parse_length(h)?)),
            None => Err(PageSizeError::UnknownPageSize(s.to_string())),
        }
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}inx{}in", self.width, self.height)
    }
}
