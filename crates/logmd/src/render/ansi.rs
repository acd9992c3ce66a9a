//! Markdown to ANSI terminal text.
//!
//! Walks the pulldown-cmark event stream, cascading [`StyleConfig`] element
//! styles from the document down to inline runs, and writes wrapped,
//! escape-decorated lines.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

use super::span::{SpanStyle, StyledSpan, paint_line};
use super::wrap::{WrapOptions, wrap_spans};
use crate::style::{StyleConfig, StylePrimitive};

/// Fallback rule when a style carries no rule format.
const DEFAULT_RULE: &str = "--------";

/// Fallback column separator for tables.
const DEFAULT_COLUMN_SEPARATOR: &str = "│";

/// Render markdown `text` with `style`, wrapping paragraphs at `width`
/// columns (0 disables wrapping).
pub(crate) fn render(style: &StyleConfig, text: &str, width: usize) -> String {
    let parser = Parser::new_ext(
        text,
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS,
    );
    let mut writer = AnsiWriter::new(style, width);
    for event in parser {
        writer.process_event(event);
    }
    writer.finish()
}

#[derive(Debug, Clone)]
struct ListState {
    /// None for unordered, Some(n) for the next ordered item number.
    ordered: Option<u64>,
    /// The current item has not written its marker yet.
    marker_pending: bool,
}

#[derive(Debug)]
struct LinkState {
    url: String,
    /// Index into the inline buffer where the link text starts.
    start: usize,
}

struct AnsiWriter<'a> {
    style: &'a StyleConfig,
    width: usize,
    out: String,
    /// Per-line prefixes of enclosing blocks (document margin, quote tokens).
    line_prefixes: Vec<String>,
    /// Cascaded inline styles; never empty.
    styles: Vec<SpanStyle>,
    /// Inline content of the block being collected.
    inline: Vec<StyledSpan>,
    lists: Vec<ListState>,
    links: Vec<LinkState>,
    /// Level of the heading being collected.
    heading: Option<usize>,
    /// Buffered text of the code block being collected.
    code_block: Option<String>,
    /// Alt text and destination of the image being collected.
    image: Option<(String, String)>,
    table_row: Vec<Vec<StyledSpan>>,
    /// A blank line is owed before the next block.
    needs_separator: bool,
}

impl<'a> AnsiWriter<'a> {
    fn new(style: &'a StyleConfig, width: usize) -> Self {
        let base = SpanStyle::default()
            .cascade(&style.document.primitive)
            .cascade(&style.text);

        let mut writer = Self {
            style,
            width,
            out: String::new(),
            line_prefixes: vec![style.document.line_prefix()],
            styles: vec![base],
            inline: Vec::new(),
            lists: Vec::new(),
            links: Vec::new(),
            heading: None,
            code_block: None,
            image: None,
            table_row: Vec::new(),
            needs_separator: false,
        };
        writer.out.push_str(&style.document.primitive.block_prefix);
        writer.out.push_str(&style.document.primitive.prefix);
        writer
    }

    // ─────────────────────────────────────────────────
    // Output primitives
    // ─────────────────────────────────────────────────

    fn current_style(&self) -> SpanStyle {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, primitive: &StylePrimitive) {
        let next = self.current_style().cascade(primitive);
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn prefix(&self) -> String {
        self.line_prefixes.concat()
    }

    /// Columns left for content after block prefixes.
    fn content_width(&self, extra: usize) -> usize {
        if self.width == 0 {
            return 0;
        }
        self.width
            .saturating_sub(self.prefix().width() + extra)
            .max(1)
    }

    fn emit_line(&mut self, content: &str) {
        let prefix = self.prefix();
        self.out.push_str(&prefix);
        self.out.push_str(content);
        self.out.push('\n');
    }

    fn write_raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn start_block(&mut self) {
        if self.needs_separator {
            self.out.push('\n');
            self.needs_separator = false;
        }
    }

    fn in_list(&self) -> bool {
        !self.lists.is_empty()
    }

    /// Indentation of content nested in the current list item.
    fn list_indent(&self) -> usize {
        self.lists.len() * self.style.list.level_indent as usize
    }

    // ─────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.add_inline_code(&code),
            Event::SoftBreak => {
                let style = self.current_style();
                self.inline.push(StyledSpan::new(" ", style));
            }
            Event::HardBreak => {
                let style = self.current_style();
                self.inline.push(StyledSpan::new("\n", style));
            }
            Event::Rule => self.add_rule(),
            Event::TaskListMarker(checked) => {
                let task = &self.style.task;
                let marker = if checked { &task.ticked } else { &task.unticked };
                let style = self.current_style().cascade(&task.primitive);
                self.inline.push(StyledSpan::verbatim(marker.clone(), style));
            }
            Event::FootnoteReference(label) => {
                let style = self.current_style();
                self.inline.push(StyledSpan::new(format!("[^{label}]"), style));
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => self.add_text(&math),
            // Raw HTML is dropped so documents cannot smuggle escape sequences.
            Event::Html(_) | Event::InlineHtml(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        let cfg = self.style;
        match tag {
            Tag::Paragraph => {
                if !self.in_list() {
                    self.start_block();
                    self.write_raw(&cfg.paragraph.primitive.block_prefix);
                }
                self.push_style(&cfg.paragraph.primitive);
            }
            Tag::Heading { level, .. } => {
                self.flush_item_content();
                self.start_block();
                let level = heading_number(level);
                let heading = &cfg.heading.primitive;
                let block = &cfg.heading_level(level).primitive;
                self.write_raw(&heading.block_prefix);
                self.write_raw(&block.block_prefix);
                self.push_style(heading);
                self.push_style(block);
                self.heading = Some(level);
            }
            Tag::CodeBlock(_) => {
                if self.in_list() {
                    self.flush_item_content();
                } else {
                    self.start_block();
                }
                self.code_block = Some(String::new());
            }
            Tag::List(start) => {
                if self.in_list() {
                    self.flush_item_content();
                } else {
                    self.start_block();
                }
                self.lists.push(ListState {
                    ordered: start,
                    marker_pending: false,
                });
                self.push_style(&cfg.list.block.primitive);
            }
            Tag::Item => {
                if let Some(list) = self.lists.last_mut() {
                    list.marker_pending = true;
                }
            }
            Tag::BlockQuote(_) => {
                self.flush_item_content();
                self.start_block();
                self.write_raw(&cfg.block_quote.primitive.block_prefix);
                self.line_prefixes.push(cfg.block_quote.line_prefix());
                self.push_style(&cfg.block_quote.primitive);
            }
            Tag::Emphasis => self.push_style(&cfg.emph),
            Tag::Strong => self.push_style(&cfg.strong),
            Tag::Strikethrough => self.push_style(&cfg.strikethrough),
            Tag::Link { dest_url, .. } => {
                self.links.push(LinkState {
                    url: dest_url.to_string(),
                    start: self.inline.len(),
                });
                self.push_style(&cfg.link_text);
            }
            Tag::Image { dest_url, .. } => {
                self.image = Some((String::new(), dest_url.to_string()));
            }
            Tag::Table(_) => {
                self.flush_item_content();
                self.start_block();
                self.push_style(&cfg.table.block.primitive);
            }
            Tag::TableHead | Tag::TableRow => self.table_row.clear(),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        let cfg = self.style;
        match tag {
            TagEnd::Paragraph => {
                self.pop_style();
                if self.in_list() {
                    self.flush_item_content();
                } else {
                    self.flush_paragraph();
                    self.write_raw(&cfg.paragraph.primitive.block_suffix);
                    self.needs_separator = true;
                }
            }
            TagEnd::Heading(_) => self.flush_heading(),
            TagEnd::CodeBlock => self.flush_code_block(),
            TagEnd::List(_) => {
                self.pop_style();
                self.lists.pop();
                if !self.in_list() {
                    self.needs_separator = true;
                }
            }
            TagEnd::Item => {
                self.flush_item_content();
                self.flush_empty_item();
                if let Some(list) = self.lists.last_mut() {
                    if let Some(n) = list.ordered.as_mut() {
                        *n += 1;
                    }
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_paragraph();
                self.pop_style();
                self.line_prefixes.pop();
                self.write_raw(&cfg.block_quote.primitive.block_suffix);
                self.needs_separator = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                self.finish_link();
            }
            TagEnd::Image => self.finish_image(),
            TagEnd::TableCell => {
                let cell = std::mem::take(&mut self.inline);
                self.table_row.push(cell);
            }
            TagEnd::TableHead | TagEnd::TableRow => self.flush_table_row(),
            TagEnd::Table => {
                self.pop_style();
                self.needs_separator = true;
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────
    // Inline content
    // ─────────────────────────────────────────────────

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(code) = self.code_block.as_mut() {
            code.push_str(text);
            return;
        }
        if let Some((alt, _)) = self.image.as_mut() {
            alt.push_str(text);
            return;
        }
        let style = self.current_style();
        self.inline.push(StyledSpan::new(style.transform(text), style));
    }

    fn add_inline_code(&mut self, code: &str) {
        let block = &self.style.code;
        let style = self.current_style().cascade(&block.primitive);
        let text = format!(
            "{}{}{}",
            block.primitive.prefix,
            block.primitive.apply_format(code),
            block.primitive.suffix
        );
        self.inline.push(StyledSpan::verbatim(text, style));
    }

    fn finish_link(&mut self) {
        let Some(link) = self.links.pop() else {
            return;
        };
        if link.url.is_empty() {
            return;
        }
        let shown: String = self.inline[link.start.min(self.inline.len())..]
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        if shown.trim() == link.url || shown.trim() == link.url.trim_start_matches("mailto:") {
            return;
        }
        let base = self.current_style();
        let url_style = base.cascade(&self.style.link);
        self.inline.push(StyledSpan::new(" ", base));
        self.inline.push(StyledSpan::new(
            self.style.link.apply_format(&link.url),
            url_style,
        ));
    }

    fn finish_image(&mut self) {
        let Some((alt, url)) = self.image.take() else {
            return;
        };
        let base = self.current_style();
        let text_style = base.cascade(&self.style.image_text);
        self.inline.push(StyledSpan::new(
            self.style.image_text.apply_format(&alt),
            text_style,
        ));
        if !url.is_empty() {
            self.inline.push(StyledSpan::new(" ", base));
            self.inline.push(StyledSpan::new(
                self.style.image.apply_format(&url),
                base.cascade(&self.style.image),
            ));
        }
    }

    // ─────────────────────────────────────────────────
    // Block flushing
    // ─────────────────────────────────────────────────

    fn flush_paragraph(&mut self) {
        if self.inline.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.inline);
        let opts = WrapOptions::new(self.content_width(0));
        for line in wrap_spans(&spans, &opts) {
            self.emit_line(&paint_line(&line));
        }
    }

    fn flush_heading(&mut self) {
        let Some(level) = self.heading.take() else {
            return;
        };
        let cfg = self.style;
        let heading = &cfg.heading.primitive;
        let block = &cfg.heading_level(level).primitive;
        let style = self.current_style();

        let content: String = std::mem::take(&mut self.inline)
            .iter()
            .map(|span| span.style.paint(&span.text))
            .collect();
        let line = format!(
            "{}{}{}",
            style.paint(&format!("{}{}", heading.prefix, block.prefix)),
            content,
            style.paint(&format!("{}{}", block.suffix, heading.suffix)),
        );

        self.emit_line(&line);
        self.write_raw(&block.block_suffix);
        self.write_raw(&heading.block_suffix);
        self.pop_style();
        self.pop_style();
    }

    fn flush_code_block(&mut self) {
        let Some(code) = self.code_block.take() else {
            return;
        };
        let cfg = self.style;
        let block = &cfg.code_block;
        let style = self.current_style().cascade(&block.primitive);
        let indent = format!("{}{}", " ".repeat(self.list_indent()), block.line_prefix());

        self.write_raw(&block.primitive.block_prefix);
        for line in code.trim_end_matches('\n').split('\n') {
            let line = format!("{indent}{}", style.paint(line));
            self.emit_line(&line);
        }
        self.write_raw(&block.primitive.block_suffix);
        if !self.in_list() {
            self.needs_separator = true;
        }
    }

    /// Item marker for the innermost list, painted.
    fn item_marker(&self, list: &ListState) -> String {
        match list.ordered {
            Some(n) => {
                let enumeration = &self.style.enumeration;
                let style = self.current_style().cascade(enumeration);
                style.paint(&format!("{n}{}", enumeration.block_prefix))
            }
            None => {
                let item = &self.style.item;
                let style = self.current_style().cascade(item);
                style.paint(&item.block_prefix)
            }
        }
    }

    fn item_marker_width(&self, list: &ListState) -> usize {
        match list.ordered {
            Some(n) => format!("{n}{}", self.style.enumeration.block_prefix).width(),
            None => self.style.item.block_prefix.width(),
        }
    }

    fn flush_item_content(&mut self) {
        if self.inline.is_empty() {
            // A block child is starting; its item's marker goes first.
            self.flush_empty_item();
            return;
        }
        let Some(list) = self.lists.last().cloned() else {
            self.flush_paragraph();
            return;
        };

        let indent = " ".repeat(self.list_indent().saturating_sub(self.style.list.level_indent as usize));
        let marker_width = self.item_marker_width(&list);
        let hanging = StyledSpan::new(
            format!("{indent}{}", " ".repeat(marker_width)),
            SpanStyle::default(),
        );
        let first = if list.marker_pending {
            StyledSpan::new(format!("{indent}{}", self.item_marker(&list)), SpanStyle::default())
        } else {
            hanging.clone()
        };

        // The painted marker carries escape codes; wrap using its visible width.
        let opts = WrapOptions {
            width: self.content_width(0),
            first_prefix: vec![hanging.clone()],
            rest_prefix: vec![hanging],
        };
        let spans = std::mem::take(&mut self.inline);
        for (i, line) in wrap_spans(&spans, &opts).into_iter().enumerate() {
            let mut rendered = String::new();
            if i == 0 {
                rendered.push_str(&first.text);
                rendered.push_str(&paint_line(&line[1..]));
            } else {
                rendered.push_str(&paint_line(&line));
            }
            self.emit_line(&rendered);
        }

        if let Some(list) = self.lists.last_mut() {
            list.marker_pending = false;
        }
    }

    /// Items without content still show their marker.
    fn flush_empty_item(&mut self) {
        let Some(list) = self.lists.last().cloned() else {
            return;
        };
        if !list.marker_pending {
            return;
        }
        let indent = " ".repeat(self.list_indent().saturating_sub(self.style.list.level_indent as usize));
        let line = format!("{indent}{}", self.item_marker(&list));
        self.emit_line(&line);
        if let Some(list) = self.lists.last_mut() {
            list.marker_pending = false;
        }
    }

    fn add_rule(&mut self) {
        self.flush_item_content();
        self.start_block();
        let rule = &self.style.horizontal_rule;
        let style = self.styles[0].cascade(rule);
        let text = if rule.format.is_empty() {
            DEFAULT_RULE.to_string()
        } else {
            rule.apply_format("")
        };
        for line in text.split('\n') {
            let line = style.paint(line);
            self.emit_line(&line);
        }
        self.needs_separator = true;
    }

    fn flush_table_row(&mut self) {
        let cells = std::mem::take(&mut self.table_row);
        if cells.is_empty() {
            return;
        }
        let separator = self
            .style
            .table
            .column_separator
            .clone()
            .unwrap_or_else(|| DEFAULT_COLUMN_SEPARATOR.to_string());
        let separator = format!(" {} ", self.current_style().paint(&separator));
        let line = cells
            .iter()
            .map(|cell| paint_line(cell))
            .collect::<Vec<_>>()
            .join(&separator);
        self.emit_line(&line);
    }

    fn finish(mut self) -> String {
        if self.code_block.is_some() {
            self.flush_code_block();
        }
        if self.heading.is_some() {
            self.flush_heading();
        }
        if self.in_list() {
            self.flush_item_content();
        } else {
            self.flush_paragraph();
        }

        let document = &self.style.document.primitive;
        self.out.push_str(&document.suffix);
        self.out.push_str(&document.block_suffix);
        self.out
    }
}

fn heading_number(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
