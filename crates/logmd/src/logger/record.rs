//! Markdown layout of log records.

use std::fmt;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    /// Name written in the record heading.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Symbol written after the name in the record heading.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Error => "✖",
            Self::Warn => "⚠",
            Self::Info => "ℹ",
            Self::Debug => "🕷",
        }
    }

    /// Built-in (primary, secondary) color pair of the severity's renderer.
    #[must_use]
    pub const fn default_colors(self) -> (&'static str, &'static str) {
        match self {
            Self::Error => ("196", "231"),
            Self::Warn => ("226", "232"),
            Self::Info => ("45", "231"),
            Self::Debug => ("9", "231"),
        }
    }

    /// Heading line of a record, e.g. `"# INFO ℹ\n"`.
    #[must_use]
    pub fn heading(self) -> String {
        format!("# {} {}\n", self.name(), self.glyph())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

/// A single log entry, captured at the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub timestamp: String,
    /// Absent when the call site could not be identified.
    pub caller: Option<String>,
    pub message: String,
}

impl LogRecord {
    #[must_use]
    pub fn new(
        severity: Severity,
        timestamp: impl Into<String>,
        caller: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            timestamp: timestamp.into(),
            caller,
            message: message.into(),
        }
    }

    /// Markdown document for the record.
    ///
    /// Expanded records lay the fields out between two rules; condensed ones
    /// put them on the heading's logical line.
    #[must_use]
    pub fn to_markdown(&self, condensed: bool) -> String {
        let heading = self.severity.heading();
        let caller = self.caller.as_deref().unwrap_or_default();
        if condensed {
            format!(
                "{heading} **{}** -- **{caller}** -- {}",
                self.timestamp, self.message
            )
        } else {
            format!(
                "{heading}---\n**TIMESTAMP**: {}\n\n**CALLER**: {caller}\n\n**MESSAGE**: {}\n\n---\n",
                self.timestamp, self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(caller: Option<&str>) -> LogRecord {
        LogRecord::new(
            Severity::Info,
            "2024-01-01 00:00:00",
            caller.map(String::from),
            "hello",
        )
    }

    #[test]
    fn test_headings() {
        assert_eq!(Severity::Info.heading(), "# INFO ℹ\n");
        assert_eq!(Severity::Debug.heading(), "# DEBUG 🕷\n");
        assert_eq!(Severity::Warn.heading(), "# WARNING ⚠\n");
        assert_eq!(Severity::Error.heading(), "# ERROR ✖\n");
    }

    #[test]
    fn test_default_colors_are_distinct() {
        let pairs: Vec<_> = Severity::ALL.iter().map(|s| s.default_colors()).collect();
        for (i, a) in pairs.iter().enumerate() {
            for b in &pairs[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Severity::Info.default_colors(), ("45", "231"));
        assert_eq!(Severity::Debug.default_colors(), ("9", "231"));
        assert_eq!(Severity::Warn.default_colors(), ("226", "232"));
        assert_eq!(Severity::Error.default_colors(), ("196", "231"));
    }

    #[test]
    fn test_from_log_level() {
        assert_eq!(Severity::from(log::Level::Trace), Severity::Debug);
        assert_eq!(Severity::from(log::Level::Warn), Severity::Warn);
    }

    #[test]
    fn test_expanded_markdown() {
        let md = record(Some("app::main")).to_markdown(false);
        assert_eq!(
            md,
            "# INFO ℹ\n---\n**TIMESTAMP**: 2024-01-01 00:00:00\n\n**CALLER**: app::main\n\n**MESSAGE**: hello\n\n---\n"
        );
    }

    #[test]
    fn test_condensed_markdown() {
        let md = record(Some("app::main")).to_markdown(true);
        assert_eq!(
            md,
            "# INFO ℹ\n **2024-01-01 00:00:00** -- **app::main** -- hello"
        );
    }

    #[test]
    fn test_missing_caller_is_empty() {
        assert!(record(None).to_markdown(false).contains("**CALLER**: \n"));
        assert!(record(None).to_markdown(true).contains("-- **** --"));
    }
}
