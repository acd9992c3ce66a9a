//! Collaborators that capture the call site and the timestamp of a record.

use std::fmt;
use std::panic::Location;

/// Timestamp layout of [`LocalClock`], e.g. `2024-05-01 14:03:27.512 +02:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %:z";

/// Names the code that emitted a record.
///
/// Returning `None` is never an error; the record is written with an empty
/// caller.
pub trait CallerSource: fmt::Debug + Send + Sync {
    fn caller(&self, location: &'static Location<'static>) -> Option<String>;
}

/// Reports the source file and line of the logging call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSite;

impl CallerSource for CallSite {
    fn caller(&self, location: &'static Location<'static>) -> Option<String> {
        Some(format!("{}:{}", location.file(), location.line()))
    }
}

/// Supplies the timestamp of a record.
pub trait Clock: fmt::Debug + Send + Sync {
    fn timestamp(&self) -> String;
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_site_names_file_and_line() {
        let location = Location::caller();
        let caller = CallSite.caller(location).unwrap();
        assert_eq!(caller, format!("{}:{}", file!(), location.line()));
    }

    #[test]
    fn test_local_clock_format() {
        let ts = LocalClock.timestamp();
        let re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3} [+-]\d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&ts), "unexpected timestamp {ts}");
    }
}
