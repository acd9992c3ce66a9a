//! Style configuration for markdown rendering.
//!
//! A [`StyleConfig`] describes, per markdown element kind, the visual
//! attributes applied when rendering: colors, emphasis flags, decorations
//! written around the element, and block spacing.
//!
//! Field names follow the common JSON style-file layout, so existing theme
//! files can be loaded with [`StyleConfig::from_path`]:
//!
//! ```json
//! {
//!   "heading": { "color": "39", "bold": true, "block_suffix": "\n" },
//!   "h1": { "prefix": " ", "suffix": " ", "background_color": "63" },
//!   "code": { "background_color": "236" }
//! }
//! ```

mod builder;
pub mod color;
mod themes;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::logging::targets;

pub use builder::{CODE_BACKGROUND, CODE_BLOCK_MARGIN, RULE_LINE, default_style};

/// Visual attributes shared by every element kind.
///
/// Color and flag fields are optional; an absent value inherits from the
/// enclosing element (and ultimately the terminal default).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePrimitive {
    /// Text written before the element's block.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block_prefix: String,
    /// Text written after the element's block.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block_suffix: String,
    /// Text written before the element, inside its styling.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    /// Text written after the element, inside its styling.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub suffix: String,
    /// Foreground color identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background color identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossed_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blink: Option<bool>,
    /// Format override. `{{.text}}` is replaced by the element text; a format
    /// without the placeholder replaces the text outright.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
}

impl StylePrimitive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    #[must_use]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    #[must_use]
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    #[must_use]
    pub fn with_crossed_out(mut self, crossed_out: bool) -> Self {
        self.crossed_out = Some(crossed_out);
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_block_prefix(mut self, block_prefix: impl Into<String>) -> Self {
        self.block_prefix = block_prefix.into();
        self
    }

    #[must_use]
    pub fn with_block_suffix(mut self, block_suffix: impl Into<String>) -> Self {
        self.block_suffix = block_suffix.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Applies the format override to `text`.
    #[must_use]
    pub fn apply_format(&self, text: &str) -> String {
        if self.format.is_empty() {
            text.to_string()
        } else if self.format.contains("{{.text}}") {
            self.format.replace("{{.text}}", text)
        } else {
            self.format.clone()
        }
    }
}

/// Attributes of a block-level element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleBlock {
    #[serde(flatten)]
    pub primitive: StylePrimitive,
    /// Number of indent tokens written before every line of the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<u32>,
    /// Token used for indentation (defaults to a space).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_token: Option<String>,
    /// Blank columns written before every line of the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
}

impl StyleBlock {
    #[must_use]
    pub fn new(primitive: StylePrimitive) -> Self {
        Self {
            primitive,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: u32, token: impl Into<String>) -> Self {
        self.indent = Some(indent);
        self.indent_token = Some(token.into());
        self
    }

    /// Prefix written before each line of the block (indent then margin).
    pub(crate) fn line_prefix(&self) -> String {
        let token = self.indent_token.as_deref().unwrap_or(" ");
        let mut prefix = token.repeat(self.indent.unwrap_or(0) as usize);
        prefix.push_str(&" ".repeat(self.margin.unwrap_or(0) as usize));
        prefix
    }
}

/// List container attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleList {
    #[serde(flatten)]
    pub block: StyleBlock,
    /// Columns added per nesting level.
    pub level_indent: u32,
}

/// Task list markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTask {
    #[serde(flatten)]
    pub primitive: StylePrimitive,
    pub ticked: String,
    pub unticked: String,
}

/// Table attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    #[serde(flatten)]
    pub block: StyleBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_separator: Option<String>,
}

/// Full set of visual attributes applied during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub document: StyleBlock,
    pub block_quote: StyleBlock,
    pub paragraph: StyleBlock,
    pub list: StyleList,

    pub heading: StyleBlock,
    pub h1: StyleBlock,
    pub h2: StyleBlock,
    pub h3: StyleBlock,
    pub h4: StyleBlock,
    pub h5: StyleBlock,
    pub h6: StyleBlock,

    pub text: StylePrimitive,
    pub strikethrough: StylePrimitive,
    pub emph: StylePrimitive,
    pub strong: StylePrimitive,
    #[serde(rename = "hr")]
    pub horizontal_rule: StylePrimitive,

    pub item: StylePrimitive,
    pub enumeration: StylePrimitive,
    pub task: StyleTask,

    pub link: StylePrimitive,
    pub link_text: StylePrimitive,
    pub image: StylePrimitive,
    pub image_text: StylePrimitive,

    pub code: StyleBlock,
    pub code_block: StyleBlock,
    pub table: StyleTable,
}

impl StyleConfig {
    /// Parse a style from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON style file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let style = Self::from_json_str(&json)?;
        log::debug!(target: targets::STYLE, "loaded style from {}", path.display());
        Ok(style)
    }

    /// Serialize the style to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every primitive in the config, tagged with its element name.
    pub(crate) fn primitives(&self) -> [(&'static str, &StylePrimitive); 26] {
        [
            ("document", &self.document.primitive),
            ("block_quote", &self.block_quote.primitive),
            ("paragraph", &self.paragraph.primitive),
            ("list", &self.list.block.primitive),
            ("heading", &self.heading.primitive),
            ("h1", &self.h1.primitive),
            ("h2", &self.h2.primitive),
            ("h3", &self.h3.primitive),
            ("h4", &self.h4.primitive),
            ("h5", &self.h5.primitive),
            ("h6", &self.h6.primitive),
            ("text", &self.text),
            ("strikethrough", &self.strikethrough),
            ("emph", &self.emph),
            ("strong", &self.strong),
            ("hr", &self.horizontal_rule),
            ("item", &self.item),
            ("enumeration", &self.enumeration),
            ("task", &self.task.primitive),
            ("link", &self.link),
            ("link_text", &self.link_text),
            ("image", &self.image),
            ("image_text", &self.image_text),
            ("code", &self.code.primitive),
            ("code_block", &self.code_block.primitive),
            ("table", &self.table.block.primitive),
        ]
    }

    /// Check that every color identifier maps to a terminal color.
    pub fn validate(&self) -> Result<(), RenderError> {
        for (element, primitive) in self.primitives() {
            let colors = [&primitive.color, &primitive.background_color];
            for color in colors.into_iter().flatten() {
                if color::parse_color(color).is_none() {
                    return Err(RenderError::InvalidColor {
                        element,
                        color: color.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Style block for a heading level (1-based, clamped to 1..=6).
    pub(crate) fn heading_level(&self, level: usize) -> &StyleBlock {
        match level {
            0 | 1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            _ => &self.h6,
        }
    }
}
