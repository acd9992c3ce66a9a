//! Capturing console for logger tests.
//!
//! Everything the logger writes is kept in memory. Assertions read it back
//! either as terminal text with escape sequences removed or as the raw bytes
//! the renderer produced.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::console::Console;

/// Console whose records are kept for inspection.
///
/// Hand [`shared()`](Self::shared) to
/// [`MarkdownLoggerBuilder::with_console`](crate::MarkdownLoggerBuilder::with_console)
/// and check the rendered records afterwards. Clones read the same capture.
#[derive(Clone)]
pub struct TestConsole {
    inner: Arc<Console>,
    captured: Arc<Mutex<String>>,
}

impl TestConsole {
    #[must_use]
    pub fn new() -> Self {
        let captured = Arc::new(Mutex::new(String::new()));
        let sink = Capture(Arc::clone(&captured));

        Self {
            inner: Arc::new(Console::with_writer(sink)),
            captured,
        }
    }

    #[must_use]
    pub fn console(&self) -> &Console {
        &self.inner
    }

    /// Console handle for a logger under test.
    #[must_use]
    pub fn shared(&self) -> Arc<Console> {
        Arc::clone(&self.inner)
    }

    fn raw_text(&self) -> String {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured lines as they appear on a terminal, without escape sequences.
    #[must_use]
    pub fn output(&self) -> Vec<String> {
        strip_ansi_escapes::strip_str(self.raw_text())
            .lines()
            .map(String::from)
            .collect()
    }

    /// Captured lines including colour and emphasis escapes.
    #[must_use]
    pub fn raw_output(&self) -> Vec<String> {
        self.raw_text().lines().map(String::from).collect()
    }

    #[must_use]
    pub fn output_string(&self) -> String {
        self.output().join("\n")
    }

    /// Case-insensitive search of the stripped output.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.output_string()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    #[must_use]
    pub fn contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|needle| self.contains(needle))
    }

    /// Whether any part of the stripped output matches `pattern`.
    ///
    /// An invalid pattern never matches.
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        regex::Regex::new(pattern).is_ok_and(|re| re.is_match(&self.output_string()))
    }

    /// # Panics
    ///
    /// Panics with the captured output if `needle` was not written.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "expected {needle:?} in logger output:\n{}",
            self.output_string()
        );
    }

    /// # Panics
    ///
    /// Panics with the captured output if `needle` was written.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "did not expect {needle:?} in logger output:\n{}",
            self.output_string()
        );
    }

    /// # Panics
    ///
    /// Panics with the captured output if the line count differs.
    pub fn assert_line_count(&self, expected: usize) {
        let lines = self.output();
        assert_eq!(
            lines.len(),
            expected,
            "unexpected line count in logger output:\n{}",
            lines.join("\n")
        );
    }

    pub fn clear(&self) {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for TestConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestConsole")
            .field("bytes", &self.raw_text().len())
            .finish_non_exhaustive()
    }
}

struct Capture(Arc<Mutex<String>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PlainRenderer;
    use crate::testing::{FixedCaller, FixedClock};
    use crate::{MarkdownLogger, MarkdownRenderer};

    fn logger(tc: &TestConsole) -> MarkdownLogger {
        MarkdownLogger::builder()
            .with_info_renderer(PlainRenderer)
            .with_warn_renderer(PlainRenderer)
            .with_error_renderer(PlainRenderer)
            .with_console(tc.shared())
            .with_clock(FixedClock::new("2024-05-01 09:00:00.000 +00:00"))
            .with_caller_source(FixedCaller::named("worker.rs:12"))
            .with_condensed_logging()
            .build()
    }

    #[test]
    fn test_captures_condensed_record() {
        let tc = TestConsole::new();
        logger(&tc).info("cache warmed");

        tc.assert_line_count(1);
        tc.assert_contains("**worker.rs:12** -- cache warmed");
    }

    #[test]
    fn test_contains_ignores_case() {
        let tc = TestConsole::new();
        logger(&tc).warn("Disk Nearly Full");

        assert!(tc.contains("warning"));
        assert!(tc.contains("disk nearly full"));
    }

    #[test]
    fn test_contains_all_sections() {
        let tc = TestConsole::new();
        logger(&tc).error("upstream timed out");

        assert!(tc.contains_all(&["# ERROR", "2024-05-01 09:00:00.000", "upstream timed out"]));
        assert!(!tc.contains_all(&["# ERROR", "# INFO"]));
        tc.assert_not_contains("# INFO");
    }

    #[test]
    fn test_matches_record_shape() {
        let tc = TestConsole::new();
        logger(&tc).info("retry 3 of 5");

        assert!(tc.matches(r"-- retry \d of \d $"));
        assert!(!tc.matches(r"-- retry [a-z]+"));
        assert!(!tc.matches(r"(unclosed"));
    }

    #[test]
    fn test_raw_output_keeps_styling() {
        let tc = TestConsole::new();
        let styled = MarkdownLogger::builder()
            .with_print_renderer(MarkdownRenderer::builder().with_word_wrap(80).build())
            .with_console(tc.shared())
            .build();
        styled.print("**bold** status");

        assert!(tc.output().iter().any(|line| line.contains("bold status")));
        assert!(tc.raw_output().iter().any(|line| line.contains('\u{1b}')));
        assert!(tc.output().iter().all(|line| !line.contains('\u{1b}')));
    }

    #[test]
    fn test_clear_between_records() {
        let tc = TestConsole::new();
        let logger = logger(&tc);
        logger.info("first");
        tc.clear();
        logger.info("second");

        tc.assert_line_count(1);
        tc.assert_not_contains("first");
    }

    #[test]
    fn test_clones_share_capture() {
        let tc = TestConsole::new();
        let reader = tc.clone();
        tc.console().print("# Report");

        assert_eq!(reader.output(), vec!["# Report"]);
    }
}
