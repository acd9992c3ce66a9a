#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod condense;
pub mod config;
pub mod console;
pub mod error;
pub mod logger; // MarkdownLogger, severities, log::Log backend
pub mod logging; // Internal diagnostics targets
pub mod render;
pub mod style;
pub mod testing; // Test utilities

pub use condense::condense;
pub use config::LoggerConfig;
pub use console::console;
pub use error::RenderError;
pub use logger::{LogRecord, MarkdownLogger, MarkdownLoggerBuilder, Severity};
pub use render::{MarkdownRenderer, MarkdownRendererBuilder, PlainRenderer, Renderer};
pub use style::{StyleConfig, default_style};
