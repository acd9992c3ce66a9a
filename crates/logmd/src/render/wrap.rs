//! Word wrapping of styled spans.
//!
//! Text spans wrap at word boundaries and collapse runs of whitespace.
//! Verbatim spans (inline code) keep their whitespace and only break by
//! character width when they cannot fit on a line of their own. A `"\n"` in
//! span text forces a line break.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::span::{SpanStyle, StyledSpan};

/// Options for wrapping styled spans with hanging indents.
#[derive(Debug, Clone, Default)]
pub(crate) struct WrapOptions {
    /// Maximum display width for lines; 0 disables wrapping.
    pub width: usize,
    /// Prefix spans for the first line (e.g. a list bullet).
    pub first_prefix: Vec<StyledSpan>,
    /// Prefix spans for continuation lines.
    pub rest_prefix: Vec<StyledSpan>,
}

impl WrapOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

fn spans_width(spans: &[StyledSpan]) -> usize {
    spans.iter().map(|s| s.text.width()).sum()
}

struct LineBuilder<'a> {
    opts: &'a WrapOptions,
    lines: Vec<Vec<StyledSpan>>,
    current: Vec<StyledSpan>,
    current_width: usize,
    first_line: bool,
    /// A collapsed space waiting for the next word, with its style.
    pending_space: Option<SpanStyle>,
}

impl<'a> LineBuilder<'a> {
    fn new(opts: &'a WrapOptions) -> Self {
        Self {
            opts,
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
            first_line: true,
            pending_space: None,
        }
    }

    fn avail_for(&self, first_line: bool) -> usize {
        if self.opts.width == 0 {
            return usize::MAX;
        }
        let prefix = if first_line {
            &self.opts.first_prefix
        } else {
            &self.opts.rest_prefix
        };
        self.opts.width.saturating_sub(spans_width(prefix)).max(1)
    }

    fn avail(&self) -> usize {
        self.avail_for(self.first_line)
    }

    fn flush(&mut self) {
        let prefix = if self.first_line {
            &self.opts.first_prefix
        } else {
            &self.opts.rest_prefix
        };
        let mut line = prefix.clone();
        line.append(&mut self.current);
        self.lines.push(line);
        self.current_width = 0;
        self.first_line = false;
        self.pending_space = None;
    }

    fn push(&mut self, text: &str, style: SpanStyle, verbatim: bool) {
        self.current_width += text.width();
        self.current.push(StyledSpan {
            text: text.to_string(),
            style,
            verbatim,
        });
    }

    /// Place `text` on the current line, wrapping or breaking as needed.
    fn place(&mut self, text: &str, style: SpanStyle, verbatim: bool) {
        let width = text.width();
        let space = match self.pending_space.take() {
            Some(space_style) if self.current_width > 0 => Some(space_style),
            _ => None,
        };
        let space_width = usize::from(space.is_some());

        if self.current_width + space_width + width <= self.avail() {
            if let Some(space_style) = space {
                self.push(" ", space_style, false);
            }
            self.push(text, style, verbatim);
            return;
        }

        if self.current_width > 0 {
            self.flush();
        }
        if width <= self.avail() {
            self.push(text, style, verbatim);
            return;
        }

        for fragment in break_by_width(text, self.avail()) {
            let fragment_width = fragment.width();
            if self.current_width > 0 && self.current_width + fragment_width > self.avail() {
                self.flush();
            }
            self.push(&fragment, style, verbatim);
        }
    }

    fn push_text(&mut self, text: &str, style: SpanStyle) {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            if !text.is_empty() && self.current_width > 0 {
                self.pending_space = Some(style);
            }
            return;
        }

        if text.starts_with(char::is_whitespace) && self.current_width > 0 {
            self.pending_space = Some(style);
        }
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                self.pending_space = Some(style);
            }
            self.place(word, style, false);
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = Some(style);
        }
    }

    fn push_span(&mut self, span: &StyledSpan) {
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            if part.is_empty() {
                continue;
            }
            if span.verbatim {
                self.place(part, span.style, true);
            } else {
                self.push_text(part, span.style);
            }
        }
    }

    fn finish(mut self) -> Vec<Vec<StyledSpan>> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.flush();
        }
        self.lines
    }
}

/// Break text into fragments no wider than `max_width` columns.
fn break_by_width(text: &str, max_width: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if ch_width > 0 && current_width + ch_width > max_width && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Wrap styled spans into lines, preserving styles across breaks.
pub(crate) fn wrap_spans(spans: &[StyledSpan], opts: &WrapOptions) -> Vec<Vec<StyledSpan>> {
    let mut builder = LineBuilder::new(opts);
    for span in spans {
        builder.push_span(span);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> StyledSpan {
        StyledSpan::new(text, SpanStyle::default())
    }

    fn line_text(line: &[StyledSpan]) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_fits_on_one_line() {
        let lines = wrap_spans(&[plain("hello world")], &WrapOptions::new(20));
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "hello world");
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let lines = wrap_spans(&[plain("hello world")], &WrapOptions::new(8));
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "hello");
        assert_eq!(line_text(&lines[1]), "world");
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        let text = "word ".repeat(100);
        let lines = wrap_spans(&[plain(&text)], &WrapOptions::new(0));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_collapses_whitespace_between_spans() {
        let bold = SpanStyle {
            bold: true,
            ..SpanStyle::default()
        };
        let spans = vec![plain("a   "), StyledSpan::new("  b", bold)];
        let lines = wrap_spans(&spans, &WrapOptions::new(80));
        assert_eq!(line_text(&lines[0]), "a b");
        assert!(lines[0].iter().any(|s| s.text == "b" && s.style == bold));
    }

    #[test]
    fn test_verbatim_keeps_inner_spaces() {
        let spans = vec![plain("use"), StyledSpan::verbatim(" foo  bar ", SpanStyle::default())];
        let lines = wrap_spans(&spans, &WrapOptions::new(80));
        assert_eq!(line_text(&lines[0]), "use foo  bar ");
    }

    #[test]
    fn test_hard_break() {
        let lines = wrap_spans(&[plain("line1\nline2")], &WrapOptions::new(80));
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[1]), "line2");
    }

    #[test]
    fn test_long_word_is_broken() {
        let lines = wrap_spans(&[plain("abcdefghij")], &WrapOptions::new(4));
        let texts: Vec<String> = lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_hanging_indent() {
        let opts = WrapOptions {
            width: 12,
            first_prefix: vec![plain("• ")],
            rest_prefix: vec![plain("  ")],
        };
        let lines = wrap_spans(&[plain("one two three four")], &opts);

        assert!(line_text(&lines[0]).starts_with("• one"));
        assert!(lines.len() > 1);
        assert!(line_text(&lines[1]).starts_with("  "));
    }

    #[test]
    fn test_empty_input_yields_prefix_line() {
        let opts = WrapOptions {
            width: 10,
            first_prefix: vec![plain("• ")],
            rest_prefix: vec![],
        };
        let lines = wrap_spans(&[], &opts);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "• ");
    }
}
