//! Style-driven markdown renderer.

use std::borrow::Cow;
use std::path::Path;

use super::{Renderer, ansi};
use crate::error::RenderError;
use crate::logging::targets;
use crate::style::{StyleConfig, default_style};

/// Primary color used when none is configured.
pub const DEFAULT_PRIMARY: &str = "45";

/// Secondary color used when none is configured.
pub const DEFAULT_SECONDARY: &str = "231";

/// Wrap width used when the terminal size is unknown.
const FALLBACK_WIDTH: usize = 80;

/// Current terminal width in columns, or 80 when stdout is not a terminal.
#[must_use]
pub fn default_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map_or(FALLBACK_WIDTH, |(_rows, cols)| usize::from(cols))
}

/// Renders markdown with either a derived or an explicit [`StyleConfig`].
///
/// Without an explicit style, each call derives one from the renderer's
/// color pair and the `condensed` flag it is given (see
/// [`default_style`]). With an explicit style, the flag is ignored.
///
/// # Example
///
/// ```
/// use logmd::{MarkdownRenderer, Renderer};
///
/// let renderer = MarkdownRenderer::builder()
///     .with_primary_color("63")
///     .with_secondary_color("231")
///     .build();
/// let out = renderer.render("# Hello", false);
/// assert!(out.contains("Hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownRenderer {
    primary: String,
    secondary: String,
    style: Option<StyleConfig>,
    word_wrap: Option<usize>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Renderer with the default color pair and derived styles.
    #[must_use]
    pub fn new() -> Self {
        MarkdownRendererBuilder::new().build()
    }

    /// Renderer deriving its styles from the given color pair.
    #[must_use]
    pub fn with_colors(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        MarkdownRendererBuilder::new()
            .with_primary_color(primary)
            .with_secondary_color(secondary)
            .build()
    }

    #[must_use]
    pub fn builder() -> MarkdownRendererBuilder {
        MarkdownRendererBuilder::new()
    }

    #[must_use]
    pub fn primary_color(&self) -> &str {
        &self.primary
    }

    #[must_use]
    pub fn secondary_color(&self) -> &str {
        &self.secondary
    }

    /// The explicit style, if one was supplied.
    #[must_use]
    pub fn style(&self) -> Option<&StyleConfig> {
        self.style.as_ref()
    }

    /// Width that paragraphs wrap at; 0 means no wrapping.
    #[must_use]
    pub fn word_wrap(&self) -> usize {
        self.word_wrap.unwrap_or_else(default_width)
    }

    /// The style a call with `condensed` renders with.
    #[must_use]
    pub fn effective_style(&self, condensed: bool) -> Cow<'_, StyleConfig> {
        match &self.style {
            Some(style) => Cow::Borrowed(style),
            None => Cow::Owned(default_style(&self.primary, &self.secondary, condensed)),
        }
    }

    /// Render, failing on styles the terminal cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] when any color identifier in the
    /// effective style does not resolve.
    pub fn try_render(&self, text: &str, condensed: bool) -> Result<String, RenderError> {
        let style = self.effective_style(condensed);
        style.validate()?;
        Ok(ansi::render(&style, text, self.word_wrap()))
    }
}

impl Renderer for MarkdownRenderer {
    /// Render leniently: unresolvable colors are dropped and the rest of the
    /// style still applies.
    fn render(&self, text: &str, condensed: bool) -> String {
        match self.try_render(text, condensed) {
            Ok(out) => out,
            Err(err) => {
                log::warn!(target: targets::RENDER, "rendering with partial styling: {err}");
                ansi::render(&self.effective_style(condensed), text, self.word_wrap())
            }
        }
    }
}

/// Builder for [`MarkdownRenderer`]. Later calls override earlier ones.
#[derive(Debug, Clone)]
pub struct MarkdownRendererBuilder {
    primary: String,
    secondary: String,
    style: Option<StyleConfig>,
    word_wrap: Option<usize>,
}

impl Default for MarkdownRendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRendererBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary: DEFAULT_PRIMARY.to_string(),
            secondary: DEFAULT_SECONDARY.to_string(),
            style: None,
            word_wrap: None,
        }
    }

    /// Use `style` for every call, ignoring the condensed flag.
    #[must_use]
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Load the explicit style from a JSON style file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn with_style_path(self, path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let style = StyleConfig::from_path(path)?;
        Ok(self.with_style(style))
    }

    /// Set the H1 banner background.
    #[must_use]
    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary = color.into();
        self
    }

    /// Set the heading foreground.
    #[must_use]
    pub fn with_secondary_color(mut self, color: impl Into<String>) -> Self {
        self.secondary = color.into();
        self
    }

    /// Wrap paragraphs at `width` columns instead of the terminal width.
    /// 0 disables wrapping.
    #[must_use]
    pub fn with_word_wrap(mut self, width: usize) -> Self {
        self.word_wrap = Some(width);
        self
    }

    #[must_use]
    pub fn build(self) -> MarkdownRenderer {
        MarkdownRenderer {
            primary: self.primary,
            secondary: self.secondary,
            style: self.style,
            word_wrap: self.word_wrap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StylePrimitive;
    use std::io::Write;

    fn stripped(text: &str) -> String {
        strip_ansi_escapes::strip_str(text)
    }

    #[test]
    fn test_defaults() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.primary_color(), "45");
        assert_eq!(renderer.secondary_color(), "231");
        assert!(renderer.style().is_none());
    }

    #[test]
    fn test_builder_last_write_wins() {
        let renderer = MarkdownRenderer::builder()
            .with_primary_color("1")
            .with_primary_color("2")
            .with_secondary_color("3")
            .build();
        assert_eq!(renderer.primary_color(), "2");
        assert_eq!(renderer.secondary_color(), "3");
    }

    #[test]
    fn test_derived_style_follows_condensed_flag() {
        let renderer = MarkdownRenderer::builder().with_word_wrap(80).build();
        let expanded = renderer.render("# INFO", false);
        let condensed = renderer.render("# INFO", true);

        assert_ne!(expanded, condensed);
        assert_eq!(stripped(&condensed), " INFO \n\n");
    }

    #[test]
    fn test_explicit_style_ignores_condensed_flag() {
        let renderer = MarkdownRenderer::builder()
            .with_style(StyleConfig::dracula())
            .with_word_wrap(80)
            .build();
        let text = "# Title\n\nSome *text* and `code`.\n\n- a\n- b\n";

        assert_eq!(renderer.render(text, false), renderer.render(text, true));
        assert_eq!(renderer.style(), Some(&StyleConfig::dracula()));
    }

    #[test]
    fn test_colors_reach_output() {
        let renderer = MarkdownRenderer::with_colors("196", "231");
        let out = renderer.render("# ERROR", false);
        assert!(out.contains("48;5;196"));
    }

    #[test]
    fn test_try_render_rejects_bad_color() {
        let renderer = MarkdownRenderer::with_colors("not-a-color", "231");
        let err = renderer.try_render("# X", false).unwrap_err();
        assert!(matches!(err, RenderError::InvalidColor { element: "h1", .. }));
    }

    #[test]
    fn test_render_degrades_on_bad_color() {
        let renderer = MarkdownRenderer::builder()
            .with_primary_color("not-a-color")
            .with_word_wrap(0)
            .build();
        let out = renderer.render("# X\n\nbody", false);

        assert!(stripped(&out).contains(" X "));
        assert!(stripped(&out).contains("body"));
        // The heading color still resolves.
        assert!(out.contains("38;5;231"));
    }

    #[test]
    fn test_word_wrap_zero_keeps_lines() {
        let renderer = MarkdownRenderer::builder().with_word_wrap(0).build();
        let text = "word ".repeat(60);
        let out = stripped(&renderer.render(&text, false));
        assert_eq!(out.lines().filter(|line| !line.is_empty()).count(), 1);
    }

    #[test]
    fn test_word_wrap_width() {
        let renderer = MarkdownRenderer::builder().with_word_wrap(20).build();
        let text = "word ".repeat(20);
        let out = stripped(&renderer.render(&text, false));
        assert!(out.lines().all(|line| line.chars().count() <= 20));
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn test_with_style_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let style = StyleConfig {
            strong: StylePrimitive::new().with_prefix("[").with_suffix("]"),
            ..StyleConfig::default()
        };
        file.write_all(style.to_json_string().unwrap().as_bytes())
            .unwrap();

        let renderer = MarkdownRenderer::builder()
            .with_style_path(file.path())
            .unwrap()
            .build();
        assert_eq!(renderer.style(), Some(&style));
    }

    #[test]
    fn test_with_style_path_missing_file() {
        let err = MarkdownRenderer::builder()
            .with_style_path("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_default_width_is_positive() {
        assert!(default_width() > 0);
    }
}
