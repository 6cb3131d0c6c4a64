use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Invalid alignment: {0} (expected center, top-left, top-right, bottom-left or bottom-right)")]
    InvalidAlignment(String),
    #[error("Invalid drawing rect: {0}")]
    InvalidRect(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Cannot render an empty point sequence.")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Route file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to read route file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed route file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No route matching {0} in route file")]
    RouteNotFound(String),
    #[error("Unsupported route geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("Position {0} has fewer than two coordinates")]
    InvalidPosition(usize),
    #[error("Route has no points.")]
    EmptyRoute,
}

#[derive(Debug, Error, PartialEq)]
pub enum NameError {
    #[error("Address has no name line.")]
    NoName,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Address index {index} out of range ({count} addresses available)")]
    AddressOutOfRange { index: usize, count: usize },
    #[error(transparent)]
    Name(#[from] NameError),
}

#[derive(Debug, Error)]
pub enum PageSizeError {
    #[error("Unknown page size: {0}")]
    UnknownPageSize(String),
    #[error("Unknown unit in page size: {0}")]
    UnknownUnit(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    PageSize(#[from] PageSizeError),
}

#[derive(Debug, Error)]
pub enum SketchError {
    #[error("Popping from an empty sketch stack.")]
    PoppedEmptyStack,
    #[error("Svg generation error: {0}")]
    SvgGenerationError(String),
    #[error("Failed to write svg: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything that can go wrong between loading a route and writing the card.
#[derive(Debug, Error)]
pub enum PostcardError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sketch(#[from] SketchError),
}
