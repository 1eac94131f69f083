//! Presentation layer for editorial-council
//!
//! This crate contains CLI definitions, input resolution, output
//! formatters, and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, DoubtArgs, FlowArgs, InputArgs, OutputFormat, PolishArgs};
pub use cli::input::ResolvedInput;
pub use output::{console::ConsoleFormatter, set_color_enabled};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
