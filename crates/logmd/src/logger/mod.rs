//! Markdown logger.
//!
//! This module provides the logging front end:
//! - [`MarkdownLogger`] - Formats records as markdown and renders them per severity
//! - [`MarkdownLoggerBuilder`] - Overrides renderers, mode and collaborators
//! - [`CallerSource`] / [`Clock`] - Injected call-site and timestamp capture
//!
//! # Example
//!
//! ```no_run
//! use logmd::MarkdownLogger;
//!
//! let logger = MarkdownLogger::builder().with_condensed_logging().build();
//! logger.info("*service started*");
//! logger.print("# Report\n\nAll checks passed.");
//! ```

mod caller;
mod log_impl;
mod record;

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use log::LevelFilter;

pub use caller::{CallSite, CallerSource, Clock, LocalClock, TIMESTAMP_FORMAT};
pub use record::{LogRecord, Severity};

use crate::condense::condense;
use crate::console::{Console, console};
use crate::render::{MarkdownRenderer, Renderer};

/// Logger that renders each record as a markdown document.
///
/// Holds one renderer per severity plus one for [`print`](Self::print). The
/// output mode is fixed at construction.
#[derive(Clone)]
pub struct MarkdownLogger {
    info: Arc<dyn Renderer>,
    debug: Arc<dyn Renderer>,
    warn: Arc<dyn Renderer>,
    error: Arc<dyn Renderer>,
    print: Arc<dyn Renderer>,
    condensed: bool,
    plain_fallback: bool,
    max_level: LevelFilter,
    console: Arc<Console>,
    caller_source: Arc<dyn CallerSource>,
    clock: Arc<dyn Clock>,
}

impl MarkdownLogger {
    /// Logger with the built-in renderers, writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        MarkdownLoggerBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> MarkdownLoggerBuilder {
        MarkdownLoggerBuilder::new()
    }

    // ─────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────

    #[must_use]
    pub fn is_condensed(&self) -> bool {
        self.condensed
    }

    /// Renderer used for records of `severity`.
    #[must_use]
    pub fn renderer(&self, severity: Severity) -> &dyn Renderer {
        match severity {
            Severity::Info => &*self.info,
            Severity::Debug => &*self.debug,
            Severity::Warn => &*self.warn,
            Severity::Error => &*self.error,
        }
    }

    /// Renderer used by [`print`](Self::print).
    #[must_use]
    pub fn print_renderer(&self) -> &dyn Renderer {
        &*self.print
    }

    // ─────────────────────────────────────────────────
    // Severity Methods
    // ─────────────────────────────────────────────────

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log_at(Severity::Info, message);
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log_at(Severity::Debug, message);
    }

    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.log_at(Severity::Warn, message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log_at(Severity::Error, message);
    }

    /// Log `message` at `severity`, naming the calling code as the caller.
    #[track_caller]
    pub fn log_at(&self, severity: Severity, message: &str) {
        let caller = self.caller_source.caller(Location::caller());
        self.emit(severity, caller, message);
    }

    /// Render `message` as a free-form document.
    ///
    /// Uses the print renderer with the logger's mode, but the output is
    /// never condensed.
    pub fn print(&self, message: &str) {
        let out = self.render_print(message);
        self.console.print(&out);
    }

    // ─────────────────────────────────────────────────
    // Formatting
    // ─────────────────────────────────────────────────

    /// Final terminal text for `record`, as written by the severity methods.
    #[must_use]
    pub fn render_record(&self, record: &LogRecord) -> String {
        let markdown = record.to_markdown(self.condensed);
        let rendered = self.render_with(self.renderer(record.severity), &markdown);
        if self.condensed {
            condense(&rendered)
        } else {
            rendered
        }
    }

    /// Final terminal text for a [`print`](Self::print) call.
    #[must_use]
    pub fn render_print(&self, message: &str) -> String {
        self.render_with(&*self.print, message)
    }

    fn render_with(&self, renderer: &dyn Renderer, markdown: &str) -> String {
        let out = renderer.render(markdown, self.condensed);
        if self.plain_fallback && out.trim().is_empty() && !markdown.trim().is_empty() {
            log::debug!(
                target: crate::logging::targets::LOGGER,
                "renderer produced no output, writing markdown unstyled"
            );
            return markdown.to_string();
        }
        out
    }

    fn emit(&self, severity: Severity, caller: Option<String>, message: &str) {
        let record = LogRecord::new(severity, self.clock.timestamp(), caller, message);
        let out = self.render_record(&record);
        self.console.print(&out);
    }
}

impl Default for MarkdownLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MarkdownLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownLogger")
            .field("info", &self.info)
            .field("debug", &self.debug)
            .field("warn", &self.warn)
            .field("error", &self.error)
            .field("print", &self.print)
            .field("condensed", &self.condensed)
            .field("plain_fallback", &self.plain_fallback)
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}

/// Builder for [`MarkdownLogger`].
///
/// Starts from the built-in renderers (one color pair per severity, see
/// [`Severity::default_colors`]) in expanded mode. Later calls override
/// earlier ones touching the same field.
///
/// # Example
///
/// ```
/// use logmd::{MarkdownLogger, MarkdownRenderer, StyleConfig};
///
/// let logger = MarkdownLogger::builder()
///     .with_print_renderer(MarkdownRenderer::builder().with_style(StyleConfig::dracula()).build())
///     .with_condensed_logging()
///     .build();
/// assert!(logger.is_condensed());
/// ```
#[derive(Clone)]
pub struct MarkdownLoggerBuilder {
    info: Arc<dyn Renderer>,
    debug: Arc<dyn Renderer>,
    warn: Arc<dyn Renderer>,
    error: Arc<dyn Renderer>,
    print: Arc<dyn Renderer>,
    condensed: bool,
    plain_fallback: bool,
    max_level: LevelFilter,
    console: Option<Arc<Console>>,
    caller_source: Arc<dyn CallerSource>,
    clock: Arc<dyn Clock>,
}

fn severity_renderer(severity: Severity) -> Arc<dyn Renderer> {
    let (primary, secondary) = severity.default_colors();
    Arc::new(MarkdownRenderer::with_colors(primary, secondary))
}

impl Default for MarkdownLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownLoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            info: severity_renderer(Severity::Info),
            debug: severity_renderer(Severity::Debug),
            warn: severity_renderer(Severity::Warn),
            error: severity_renderer(Severity::Error),
            print: Arc::new(MarkdownRenderer::new()),
            condensed: false,
            plain_fallback: false,
            max_level: LevelFilter::Trace,
            console: None,
            caller_source: Arc::new(CallSite),
            clock: Arc::new(LocalClock),
        }
    }

    #[must_use]
    pub fn with_info_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.info = Arc::new(renderer);
        self
    }

    #[must_use]
    pub fn with_debug_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.debug = Arc::new(renderer);
        self
    }

    #[must_use]
    pub fn with_warn_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.warn = Arc::new(renderer);
        self
    }

    #[must_use]
    pub fn with_error_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.error = Arc::new(renderer);
        self
    }

    /// Set the renderer for one severity.
    #[must_use]
    pub fn with_renderer(self, severity: Severity, renderer: impl Renderer + 'static) -> Self {
        match severity {
            Severity::Info => self.with_info_renderer(renderer),
            Severity::Debug => self.with_debug_renderer(renderer),
            Severity::Warn => self.with_warn_renderer(renderer),
            Severity::Error => self.with_error_renderer(renderer),
        }
    }

    #[must_use]
    pub fn with_print_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.print = Arc::new(renderer);
        self
    }

    /// Collapse every severity record onto a single line.
    #[must_use]
    pub fn with_condensed_logging(mut self) -> Self {
        self.condensed = true;
        self
    }

    /// Write the unstyled markdown when a renderer returns nothing for
    /// non-empty input.
    #[must_use]
    pub fn with_plain_fallback(mut self, enabled: bool) -> Self {
        self.plain_fallback = enabled;
        self
    }

    /// Most verbose level accepted when installed as the `log` backend.
    #[must_use]
    pub fn with_max_level(mut self, filter: LevelFilter) -> Self {
        self.max_level = filter;
        self
    }

    /// Write to `console` instead of the global stdout console.
    #[must_use]
    pub fn with_console(mut self, console: Arc<Console>) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use]
    pub fn with_caller_source(mut self, source: impl CallerSource + 'static) -> Self {
        self.caller_source = Arc::new(source);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn build(self) -> MarkdownLogger {
        MarkdownLogger {
            info: self.info,
            debug: self.debug,
            warn: self.warn,
            error: self.error,
            print: self.print,
            condensed: self.condensed,
            plain_fallback: self.plain_fallback,
            max_level: self.max_level,
            console: self.console.unwrap_or_else(console),
            caller_source: self.caller_source,
            clock: self.clock,
        }
    }
}

impl fmt::Debug for MarkdownLoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownLoggerBuilder")
            .field("condensed", &self.condensed)
            .field("plain_fallback", &self.plain_fallback)
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}
