//! `log` crate backend.
//!
//! Installing a [`MarkdownLogger`] as the global logger routes `log::info!`
//! and friends through the severity renderers:
//!
//! ```ignore
//! use log::LevelFilter;
//! use logmd::MarkdownLogger;
//!
//! MarkdownLogger::init(LevelFilter::Info)?;
//! log::warn!("cache miss rate is {}%", 42);
//! ```

use log::{LevelFilter, Log, Metadata, Record};

use super::{MarkdownLogger, MarkdownLoggerBuilder, Severity};
use crate::logging::is_internal_target;

impl MarkdownLogger {
    /// Install a default logger as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(filter: LevelFilter) -> Result<(), log::SetLoggerError> {
        MarkdownLoggerBuilder::new().with_max_level(filter).init()
    }

    /// Install as the global logger, ignoring errors if already set.
    pub fn try_init(filter: LevelFilter) {
        let _ = Self::init(filter);
    }

    /// Caller name of a `log` record: module path and line when known.
    fn record_caller(record: &Record<'_>) -> Option<String> {
        let module = record.module_path().or_else(|| record.file())?;
        Some(match record.line() {
            Some(line) => format!("{module}:{line}"),
            None => module.to_string(),
        })
    }
}

impl MarkdownLoggerBuilder {
    /// Build and install as the global logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let logger = self.build();
        let filter = logger.max_level;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(filter);
        Ok(())
    }

    /// Build and install, ignoring errors if already set.
    pub fn try_init(self) {
        let _ = self.init();
    }
}

impl Log for MarkdownLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        // logmd's own diagnostics may come from inside a render call.
        if is_internal_target(record.target()) {
            self.console.print_plain(&format!(
                "[{}] {}: {message}",
                record.level(),
                record.target()
            ));
            return;
        }

        self.emit(
            Severity::from(record.level()),
            Self::record_caller(record),
            &message,
        );
    }

    fn flush(&self) {}
}
