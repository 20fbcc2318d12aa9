//! Report formatting

pub mod formatter;

pub use formatter::{ConsoleFormatter, JsonFormatter, MarkdownFormatter, ReportGenerator};
