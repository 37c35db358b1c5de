//! Presentation layer for querydash
//!
//! This crate contains CLI definitions, output formatters,
//! streamed console output, the dashboard view and the interactive chat.

pub mod chat;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormatArg, ProviderArg};
pub use config::OutputConfig;
pub use dashboard::DashboardView;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{SpinnerOnly, StreamPrinter};
