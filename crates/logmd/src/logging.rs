//! Internal diagnostics for logmd.
//!
//! logmd reports its own problems (swallowed render failures, unreadable style
//! files) through the [`log`] facade. These never go through a markdown
//! renderer, even when a [`MarkdownLogger`](crate::MarkdownLogger) is the
//! installed backend.
//!
//! Example filter: `RUST_LOG=logmd::render=warn`

pub use log::{Level, LevelFilter};

/// Log targets used by logmd components.
pub mod targets {
    /// Root target for all logmd diagnostics.
    pub const LOGMD: &str = "logmd";

    /// Markdown rendering.
    pub const RENDER: &str = "logmd::render";

    /// Style loading and validation.
    pub const STYLE: &str = "logmd::style";

    /// Logger construction and output.
    pub const LOGGER: &str = "logmd::logger";
}

/// Returns true when `target` belongs to logmd itself.
#[inline]
#[must_use]
pub fn is_internal_target(target: &str) -> bool {
    target == targets::LOGMD
        || target
            .strip_prefix(targets::LOGMD)
            .is_some_and(|rest| rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_root() {
        for target in [targets::RENDER, targets::STYLE, targets::LOGGER] {
            assert!(target.starts_with(targets::LOGMD));
            assert!(is_internal_target(target));
        }
    }

    #[test]
    fn test_foreign_targets_are_not_internal() {
        assert!(is_internal_target("logmd"));
        assert!(!is_internal_target("logmdx"));
        assert!(!is_internal_target("my_app::logmd"));
        assert!(!is_internal_target("app"));
    }
}
