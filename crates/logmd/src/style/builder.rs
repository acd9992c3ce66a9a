//! Default style derivation from a primary/secondary color pair.

use super::{StyleBlock, StyleConfig, StylePrimitive};

/// Background of inline code, independent of the color pair.
pub const CODE_BACKGROUND: &str = "236";

/// Left margin of fenced and indented code blocks.
pub const CODE_BLOCK_MARGIN: u32 = 2;

/// Horizontal rule drawn in place of any theme rule glyphs.
pub const RULE_LINE: &str = "------------------------------";

/// Derive the default style for a color pair.
///
/// `primary` fills the H1 banner background and `secondary` colors every
/// heading. In condensed mode headings carry no block suffix so they stay on
/// the same line as the text that follows.
#[must_use]
pub fn default_style(primary: &str, secondary: &str, condensed: bool) -> StyleConfig {
    let base = StyleConfig::dark();
    let heading_suffix = if condensed { "" } else { "\n" };

    StyleConfig {
        document: StyleBlock::new(StylePrimitive::new().with_suffix("\n")),
        heading: StyleBlock::new(
            StylePrimitive::new()
                .with_color(secondary)
                .with_bold(true)
                .with_block_suffix(heading_suffix),
        ),
        h1: StyleBlock::new(
            StylePrimitive::new()
                .with_background(primary)
                .with_prefix(" ")
                .with_suffix(" "),
        ),
        h2: StyleBlock::new(StylePrimitive::new().with_prefix("## ").with_bold(true)),
        strong: StylePrimitive::new().with_bold(true),
        emph: StylePrimitive::new().with_italic(true),
        horizontal_rule: StylePrimitive::new().with_format(RULE_LINE),
        code_block: StyleBlock::default().with_margin(CODE_BLOCK_MARGIN),
        code: StyleBlock::new(
            StylePrimitive::new()
                .with_background(CODE_BACKGROUND)
                .with_prefix(" ")
                .with_suffix(" "),
        ),
        list: base.list,
        item: base.item,
        enumeration: base.enumeration,
        ..StyleConfig::default()
    }
}
