//! Error types for style loading and strict rendering.

use std::fmt;
use std::io;

/// Failure raised by the strict rendering path or by style loading.
///
/// The lenient [`Renderer::render`](crate::render::Renderer::render) path never
/// returns this; it degrades to unstyled output instead.
#[derive(Debug)]
pub enum RenderError {
    /// A color identifier in the style could not be mapped to a terminal color.
    InvalidColor {
        /// Style element carrying the color (e.g. `"h1"`).
        element: &'static str,
        /// The identifier as written in the style.
        color: String,
    },
    /// A style document could not be parsed.
    InvalidStyle(serde_json::Error),
    /// A style file could not be read.
    Io(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { element, color } => {
                write!(f, "invalid color {color:?} in style element `{element}`")
            }
            Self::InvalidStyle(err) => write!(f, "invalid style document: {err}"),
            Self::Io(err) => write!(f, "failed to read style: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColor { .. } => None,
            Self::InvalidStyle(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidStyle(err)
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
