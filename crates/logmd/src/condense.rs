//! Collapse rendered multi-line output onto a single line.

/// Joins the lines of `text` into one line.
///
/// Every line is trimmed and followed by a single space; blank lines are
/// dropped. The result ends with one line break, so condensed text can be
/// condensed again without change.
///
/// ```
/// assert_eq!(logmd::condense("a\n  b  \nc\n"), "a b c \n");
/// ```
#[must_use]
pub fn condense(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        out.push_str(line);
        out.push(' ');
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condense_basic() {
        assert_eq!(condense("a\n  b  \nc\n"), "a b c \n");
    }

    #[test]
    fn test_condense_preserves_order() {
        let text = "first\nsecond\n\n  third\nfourth  ";
        let condensed = condense(text);
        let tokens: Vec<&str> = condensed.split_whitespace().collect();
        assert_eq!(tokens, ["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_condense_is_single_line() {
        let out = condense(" INFO \n\n2024-01-01 -- main -- hello\n\n");
        assert_eq!(out, "INFO 2024-01-01 -- main -- hello \n");
        assert_eq!(out.matches('\n').count(), 1);
        assert!(out.ends_with(" \n"));
    }

    #[test]
    fn test_condense_reapply_is_stable() {
        let once = condense("x\ny\n");
        assert_eq!(condense(&once), once);
    }

    #[test]
    fn test_condense_crlf() {
        assert_eq!(condense("a\r\nb\r\n"), "a b \n");
    }

    #[test]
    fn test_condense_empty() {
        assert_eq!(condense(""), "\n");
        assert_eq!(condense("\n\n  \n"), "\n");
    }

    #[test]
    fn test_condense_keeps_ansi_sequences() {
        let painted = "\u{1b}[1mbold\u{1b}[0m\nplain";
        assert_eq!(condense(painted), "\u{1b}[1mbold\u{1b}[0m plain \n");
    }
}
