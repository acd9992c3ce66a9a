//! Testing utilities for logmd output
//!
//! Provides `TestConsole` for capturing and asserting on logger output, and
//! deterministic stand-ins for the caller and clock collaborators.

mod test_console;

use std::panic::Location;

pub use test_console::TestConsole;

use crate::logger::{CallerSource, Clock};

/// Caller source that reports the same name for every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedCaller(Option<String>);

impl FixedCaller {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    /// A caller source that never identifies the call site.
    #[must_use]
    pub fn unknown() -> Self {
        Self(None)
    }
}

impl CallerSource for FixedCaller {
    fn caller(&self, _location: &'static Location<'static>) -> Option<String> {
        self.0.clone()
    }
}

/// Clock that always reports the same timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    #[must_use]
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
