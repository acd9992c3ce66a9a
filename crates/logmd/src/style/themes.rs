//! Built-in themes.

use super::{StyleBlock, StyleConfig, StyleList, StylePrimitive, StyleTask};

fn heading_prefix(prefix: &str) -> StyleBlock {
    StyleBlock::new(StylePrimitive::new().with_prefix(prefix))
}

fn task() -> StyleTask {
    StyleTask {
        primitive: StylePrimitive::new(),
        ticked: "[✓] ".to_string(),
        unticked: "[ ] ".to_string(),
    }
}

fn list() -> StyleList {
    StyleList {
        block: StyleBlock::default(),
        level_indent: 2,
    }
}

impl StyleConfig {
    /// Dark terminal theme. List styling of the default style derives from it.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            document: StyleBlock::new(
                StylePrimitive::new()
                    .with_block_prefix("\n")
                    .with_block_suffix("\n")
                    .with_color("252"),
            )
            .with_margin(2),
            block_quote: StyleBlock::default().with_indent(1, "│ "),
            list: list(),
            heading: StyleBlock::new(
                StylePrimitive::new()
                    .with_block_suffix("\n")
                    .with_color("39")
                    .with_bold(true),
            ),
            h1: StyleBlock::new(
                StylePrimitive::new()
                    .with_prefix(" ")
                    .with_suffix(" ")
                    .with_color("228")
                    .with_background("63")
                    .with_bold(true),
            ),
            h2: heading_prefix("## "),
            h3: heading_prefix("### "),
            h4: heading_prefix("#### "),
            h5: heading_prefix("##### "),
            h6: StyleBlock::new(
                StylePrimitive::new()
                    .with_prefix("###### ")
                    .with_color("35")
                    .with_bold(false),
            ),
            strikethrough: StylePrimitive::new().with_crossed_out(true),
            emph: StylePrimitive::new().with_italic(true),
            strong: StylePrimitive::new().with_bold(true),
            horizontal_rule: StylePrimitive::new()
                .with_color("240")
                .with_format("\n--------\n"),
            item: StylePrimitive::new().with_block_prefix("• "),
            enumeration: StylePrimitive::new().with_block_prefix(". "),
            task: task(),
            link: StylePrimitive::new().with_color("30").with_underline(true),
            link_text: StylePrimitive::new().with_color("35").with_bold(true),
            image: StylePrimitive::new().with_color("212").with_underline(true),
            image_text: StylePrimitive::new()
                .with_color("243")
                .with_format("Image: {{.text}} →"),
            code: StyleBlock::new(
                StylePrimitive::new()
                    .with_prefix(" ")
                    .with_suffix(" ")
                    .with_color("203")
                    .with_background("236"),
            ),
            code_block: StyleBlock::new(StylePrimitive::new().with_color("244")).with_margin(2),
            ..Self::default()
        }
    }

    /// Dracula palette theme.
    #[must_use]
    pub fn dracula() -> Self {
        Self {
            document: StyleBlock::new(
                StylePrimitive::new()
                    .with_block_prefix("\n")
                    .with_block_suffix("\n")
                    .with_color("#f8f8f2"),
            )
            .with_margin(2),
            block_quote: StyleBlock::new(
                StylePrimitive::new().with_color("#f1fa8c").with_italic(true),
            )
            .with_indent(2, " "),
            list: StyleList {
                block: StyleBlock::new(StylePrimitive::new().with_color("#f8f8f2")),
                level_indent: 2,
            },
            heading: StyleBlock::new(
                StylePrimitive::new()
                    .with_block_suffix("\n")
                    .with_color("#bd93f9")
                    .with_bold(true),
            ),
            h1: heading_prefix("# "),
            h2: heading_prefix("## "),
            h3: heading_prefix("### "),
            h4: heading_prefix("#### "),
            h5: heading_prefix("##### "),
            h6: heading_prefix("###### "),
            strikethrough: StylePrimitive::new().with_crossed_out(true),
            emph: StylePrimitive::new().with_italic(true).with_color("#f1fa8c"),
            strong: StylePrimitive::new().with_bold(true).with_color("#ffb86c"),
            horizontal_rule: StylePrimitive::new()
                .with_color("#6272a4")
                .with_format("\n--------\n"),
            item: StylePrimitive::new().with_block_prefix("• "),
            enumeration: StylePrimitive::new()
                .with_block_prefix(". ")
                .with_color("#8be9fd"),
            task: task(),
            link: StylePrimitive::new().with_color("#8be9fd").with_underline(true),
            link_text: StylePrimitive::new().with_color("#ff79c6"),
            image: StylePrimitive::new().with_color("#8be9fd").with_underline(true),
            image_text: StylePrimitive::new()
                .with_color("#ff79c6")
                .with_format("Image: {{.text}} →"),
            code: StyleBlock::new(StylePrimitive::new().with_color("#50fa7b")),
            code_block: StyleBlock::new(StylePrimitive::new().with_color("#ffb86c"))
                .with_margin(2),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_list_markers() {
        let dark = StyleConfig::dark();
        assert_eq!(dark.item.block_prefix, "• ");
        assert_eq!(dark.enumeration.block_prefix, ". ");
        assert_eq!(dark.list.level_indent, 2);
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(StyleConfig::dark(), StyleConfig::dracula());
    }
}
