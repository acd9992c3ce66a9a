//! Styled text runs and their ANSI encoding.

use console::Style;

use crate::style::StylePrimitive;
use crate::style::color::parse_color;

/// Resolved attributes of a run of text after cascading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SpanStyle {
    pub fg: Option<u8>,
    pub bg: Option<u8>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub crossed_out: bool,
    pub faint: bool,
    pub inverse: bool,
    pub blink: bool,
    pub upper: bool,
    pub lower: bool,
}

impl SpanStyle {
    /// Layer `primitive` over this style. Unset fields inherit; colors that do
    /// not resolve are treated as unset.
    pub fn cascade(&self, primitive: &StylePrimitive) -> Self {
        let mut next = *self;
        if let Some(fg) = primitive.color.as_deref().and_then(parse_color) {
            next.fg = Some(fg);
        }
        if let Some(bg) = primitive.background_color.as_deref().and_then(parse_color) {
            next.bg = Some(bg);
        }
        let flags = [
            (&mut next.bold, primitive.bold),
            (&mut next.italic, primitive.italic),
            (&mut next.underline, primitive.underline),
            (&mut next.crossed_out, primitive.crossed_out),
            (&mut next.faint, primitive.faint),
            (&mut next.inverse, primitive.inverse),
            (&mut next.blink, primitive.blink),
            (&mut next.upper, primitive.upper),
            (&mut next.lower, primitive.lower),
        ];
        for (slot, value) in flags {
            if let Some(value) = value {
                *slot = value;
            }
        }
        next
    }

    /// Apply case transforms carried by the style.
    pub fn transform(&self, text: &str) -> String {
        if self.upper {
            text.to_uppercase()
        } else if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }

    /// Encode `text` with this style as ANSI escape sequences.
    pub fn paint(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut style = Style::new().force_styling(true);
        if let Some(fg) = self.fg {
            style = style.color256(fg);
        }
        if let Some(bg) = self.bg {
            style = style.on_color256(bg);
        }
        if self.bold {
            style = style.bold();
        }
        if self.faint {
            style = style.dim();
        }
        if self.italic {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        if self.blink {
            style = style.blink();
        }
        if self.inverse {
            style = style.reverse();
        }
        if self.crossed_out {
            style = style.strikethrough();
        }
        style.apply_to(text).to_string()
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
    /// Whitespace is significant (inline code); never split at spaces.
    pub verbatim: bool,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
            verbatim: false,
        }
    }

    pub fn verbatim(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
            verbatim: true,
        }
    }
}

/// Encode a line of spans, merging neighbours that share a style.
pub(crate) fn paint_line(spans: &[StyledSpan]) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut run_style: Option<SpanStyle> = None;

    for span in spans {
        if run_style.is_some_and(|style| style != span.style) {
            if let Some(style) = run_style {
                out.push_str(&style.paint(&run));
            }
            run.clear();
        }
        run_style = Some(span.style);
        run.push_str(&span.text);
    }
    if let Some(style) = run_style {
        out.push_str(&style.paint(&run));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_overrides_only_set_fields() {
        let base = SpanStyle {
            fg: Some(1),
            bold: true,
            ..SpanStyle::default()
        };
        let next = base.cascade(&StylePrimitive::new().with_background("236").with_italic(true));

        assert_eq!(next.fg, Some(1));
        assert_eq!(next.bg, Some(236));
        assert!(next.bold);
        assert!(next.italic);
    }

    #[test]
    fn test_cascade_can_clear_flags() {
        let base = SpanStyle {
            bold: true,
            ..SpanStyle::default()
        };
        assert!(!base.cascade(&StylePrimitive::new().with_bold(false)).bold);
    }

    #[test]
    fn test_cascade_ignores_unresolvable_colors() {
        let base = SpanStyle {
            fg: Some(7),
            ..SpanStyle::default()
        };
        let next = base.cascade(&StylePrimitive::new().with_color("nope"));
        assert_eq!(next.fg, Some(7));
    }

    #[test]
    fn test_paint_plain_has_no_escapes() {
        assert_eq!(SpanStyle::default().paint("hello"), "hello");
        assert_eq!(SpanStyle::default().paint(""), "");
    }

    #[test]
    fn test_paint_emits_256_color_codes() {
        let style = SpanStyle {
            fg: Some(231),
            bg: Some(45),
            bold: true,
            ..SpanStyle::default()
        };
        let painted = style.paint("INFO");

        assert!(painted.contains("38;5;231"));
        assert!(painted.contains("48;5;45"));
        assert!(painted.contains("INFO"));
        let stripped = strip_ansi_escapes::strip_str(&painted);
        assert_eq!(stripped, "INFO");
    }

    #[test]
    fn test_transform_case() {
        let upper = SpanStyle {
            upper: true,
            ..SpanStyle::default()
        };
        assert_eq!(upper.transform("abc"), "ABC");
        assert_eq!(SpanStyle::default().transform("abc"), "abc");
    }

    #[test]
    fn test_paint_line_merges_same_style() {
        let bold = SpanStyle {
            bold: true,
            ..SpanStyle::default()
        };
        let spans = vec![
            StyledSpan::new("a", bold),
            StyledSpan::new(" ", bold),
            StyledSpan::new("b", bold),
            StyledSpan::new(" c", SpanStyle::default()),
        ];
        let line = paint_line(&spans);

        assert_eq!(line, format!("{} c", bold.paint("a b")));
    }
}
