//! Renderers turn markdown text into terminal output.
//!
//! - [`Renderer`] - The single-method capability the logger depends on
//! - [`MarkdownRenderer`] - Style-driven markdown to ANSI rendering
//! - [`PlainRenderer`] - Returns text unchanged (tests, unstyled sinks)

mod ansi;
mod markdown;
mod span;
mod wrap;

use std::fmt;
use std::sync::Arc;

pub use markdown::{MarkdownRenderer, MarkdownRendererBuilder, default_width};

/// Converts a markdown document into decorated terminal text.
///
/// `condensed` is the logger's output mode. Implementations may use it to
/// pick a layout; they never fail; a renderer that cannot style its input
/// degrades to partial or empty output.
pub trait Renderer: fmt::Debug + Send + Sync {
    fn render(&self, text: &str, condensed: bool) -> String;
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    fn render(&self, text: &str, condensed: bool) -> String {
        (**self).render(text, condensed)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, text: &str, condensed: bool) -> String {
        (**self).render(text, condensed)
    }
}

/// Renderer that passes markdown through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn render(&self, text: &str, _condensed: bool) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer_is_identity() {
        let text = "# INFO\n**x**\n";
        assert_eq!(PlainRenderer.render(text, false), text);
        assert_eq!(PlainRenderer.render(text, true), text);
    }

    #[test]
    fn test_shared_renderer_delegates() {
        let shared: Arc<dyn Renderer> = Arc::new(PlainRenderer);
        assert_eq!(shared.render("a", false), "a");

        let boxed: Box<dyn Renderer> = Box::new(PlainRenderer);
        assert_eq!(boxed.render("b", true), "b");
    }
}
