//! Serialized output sink

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

/// Line-oriented output sink shared by loggers.
///
/// Each call writes one complete record under a lock, so records from
/// concurrent loggers never interleave.
pub struct Console {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    /// Console writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create with custom writer (for testing)
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    // ─────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────

    /// Write `text` as one record, adding a line break unless it already
    /// ends with one.
    ///
    /// # Errors
    ///
    /// Returns the writer's error, or an error if a previous writer panicked
    /// while holding the lock.
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        let mut record = String::with_capacity(text.len() + 1);
        record.push_str(text);
        if !record.ends_with('\n') {
            record.push('\n');
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("console writer lock poisoned"))?;
        writer.write_all(record.as_bytes())?;
        writer.flush()
    }

    /// Write a record, ignoring output errors.
    pub fn print(&self, text: &str) {
        let _ = self.write_line(text);
    }

    /// Write a record with any escape sequences removed.
    pub fn print_plain(&self, text: &str) {
        self.print(&strip_ansi_escapes::strip_str(text));
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────
// Global Console Accessor
// ─────────────────────────────────────────────────────────

static CONSOLE: OnceLock<Arc<Console>> = OnceLock::new();

/// Get the global stdout console
#[must_use]
pub fn console() -> Arc<Console> {
    CONSOLE.get_or_init(|| Arc::new(Console::stdout())).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_line_appends_newline() {
        let sink = Shared::default();
        let console = Console::with_writer(sink.clone());
        console.write_line("hello").unwrap();
        assert_eq!(sink.text(), "hello\n");
    }

    #[test]
    fn test_write_line_keeps_existing_newline() {
        let sink = Shared::default();
        let console = Console::with_writer(sink.clone());
        console.write_line("one \n").unwrap();
        console.write_line("").unwrap();
        assert_eq!(sink.text(), "one \n\n");
    }

    #[test]
    fn test_print_swallows_errors() {
        let console = Console::with_writer(Broken);
        assert!(console.write_line("x").is_err());
        console.print("x");
    }

    #[test]
    fn test_print_plain_strips_escapes() {
        let sink = Shared::default();
        let console = Console::with_writer(sink.clone());
        console.print_plain("\u{1b}[1mbold\u{1b}[0m");
        assert_eq!(sink.text(), "bold\n");
    }

    #[test]
    fn test_global_console_is_shared() {
        assert!(Arc::ptr_eq(&console(), &console()));
    }

    #[test]
    fn test_concurrent_records_do_not_interleave() {
        let sink = Shared::default();
        let console = Arc::new(Console::with_writer(sink.clone()));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let console = Arc::clone(&console);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        console.print(&format!("thread-{t} record-{i} {}", "x".repeat(64)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = sink.text();
        assert_eq!(text.lines().count(), 200);
        assert!(text.lines().all(|line| line.starts_with("thread-") && line.ends_with(&"x".repeat(64))));
    }
}
