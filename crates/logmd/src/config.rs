//! Environment-driven logger configuration.
//!
//! `LoggerConfig` collects the knobs an application usually wants to expose
//! to operators, and turns them into a [`MarkdownLoggerBuilder`].

use std::env;
use std::path::PathBuf;

use crate::error::RenderError;
use crate::logger::{MarkdownLoggerBuilder, Severity};
use crate::render::MarkdownRenderer;

/// Configuration for a [`MarkdownLogger`](crate::MarkdownLogger)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Collapse severity records onto one line
    pub condensed: bool,
    /// Wrap width for every renderer (None = terminal width, 0 = no wrapping)
    pub word_wrap: Option<usize>,
    /// JSON style file for the print renderer
    pub style_path: Option<PathBuf>,
    /// Emit unstyled markdown when a renderer produces nothing
    pub plain_fallback: bool,
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `LOGMD_CONDENSED` | 1/true/yes | Condensed logging |
    /// | `LOGMD_WORD_WRAP` | integer | Wrap width (0 = off) |
    /// | `LOGMD_STYLE` | path | JSON style for `print` |
    /// | `LOGMD_PLAIN_FALLBACK` | 1/true/yes | Raw markdown when rendering yields nothing |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("LOGMD_CONDENSED") {
            config.condensed = is_truthy(&val);
        }
        if let Some(val) = lookup("LOGMD_WORD_WRAP") {
            // Unparseable widths fall back to the terminal width.
            config.word_wrap = val.trim().parse().ok();
        }
        if let Some(val) = lookup("LOGMD_STYLE") {
            if !val.trim().is_empty() {
                config.style_path = Some(PathBuf::from(val));
            }
        }
        if let Some(val) = lookup("LOGMD_PLAIN_FALLBACK") {
            config.plain_fallback = is_truthy(&val);
        }

        config
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn condensed(mut self, condensed: bool) -> Self {
        self.condensed = condensed;
        self
    }

    #[must_use]
    pub fn with_word_wrap(mut self, width: usize) -> Self {
        self.word_wrap = Some(width);
        self
    }

    #[must_use]
    pub fn with_style_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.style_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_plain_fallback(mut self, enabled: bool) -> Self {
        self.plain_fallback = enabled;
        self
    }

    // ─────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────

    fn renderer(&self, primary: &str, secondary: &str) -> MarkdownRenderer {
        let builder = MarkdownRenderer::builder()
            .with_primary_color(primary)
            .with_secondary_color(secondary);
        match self.word_wrap {
            Some(width) => builder.with_word_wrap(width).build(),
            None => builder.build(),
        }
    }

    /// Logger builder reflecting this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the style file cannot be read or parsed.
    pub fn into_builder(self) -> Result<MarkdownLoggerBuilder, RenderError> {
        let mut builder = MarkdownLoggerBuilder::new().with_plain_fallback(self.plain_fallback);

        for severity in Severity::ALL {
            let (primary, secondary) = severity.default_colors();
            builder = builder.with_renderer(severity, self.renderer(primary, secondary));
        }

        let mut print = MarkdownRenderer::builder();
        if let Some(width) = self.word_wrap {
            print = print.with_word_wrap(width);
        }
        if let Some(path) = &self.style_path {
            print = print.with_style_path(path)?;
        }
        builder = builder.with_print_renderer(print.build());

        if self.condensed {
            builder = builder.with_condensed_logging();
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfig;
    use crate::testing::TestConsole;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::new();
        assert!(!config.condensed);
        assert_eq!(config.word_wrap, None);
        assert_eq!(config.style_path, None);
        assert!(!config.plain_fallback);
    }

    #[test]
    fn test_from_lookup() {
        let config = LoggerConfig::from_lookup(lookup(&[
            ("LOGMD_CONDENSED", "yes"),
            ("LOGMD_WORD_WRAP", " 100 "),
            ("LOGMD_STYLE", "/etc/logmd/style.json"),
            ("LOGMD_PLAIN_FALLBACK", "TRUE"),
        ]));

        assert!(config.condensed);
        assert_eq!(config.word_wrap, Some(100));
        assert_eq!(config.style_path, Some(PathBuf::from("/etc/logmd/style.json")));
        assert!(config.plain_fallback);
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = LoggerConfig::from_lookup(lookup(&[
            ("LOGMD_CONDENSED", "0"),
            ("LOGMD_WORD_WRAP", "wide"),
            ("LOGMD_STYLE", "  "),
        ]));
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggerConfig::new()
            .condensed(true)
            .with_word_wrap(0)
            .with_plain_fallback(true);
        assert!(config.condensed);
        assert_eq!(config.word_wrap, Some(0));
        assert!(config.plain_fallback);
    }

    #[test]
    fn test_into_builder_applies_mode_and_wrap() {
        let tc = TestConsole::new();
        let logger = LoggerConfig::new()
            .condensed(true)
            .with_word_wrap(0)
            .into_builder()
            .unwrap()
            .with_console(tc.shared())
            .build();

        assert!(logger.is_condensed());
        logger.warn(&"long ".repeat(40));
        tc.assert_line_count(1);
        assert!(format!("{:?}", logger.renderer(Severity::Warn)).contains("\"226\""));
    }

    #[test]
    fn test_into_builder_loads_print_style() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(StyleConfig::dracula().to_json_string().unwrap().as_bytes())
            .unwrap();

        let logger = LoggerConfig::new()
            .with_style_path(file.path())
            .into_builder()
            .unwrap()
            .build();
        let debug = format!("{:?}", logger.print_renderer());
        assert!(debug.contains("#bd93f9"), "got {debug}");
    }

    #[test]
    fn test_into_builder_reports_bad_style() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ nope").unwrap();

        let err = LoggerConfig::new()
            .with_style_path(file.path())
            .into_builder()
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidStyle(_)));
    }
}
