//! Presentation layer for allar-ai
//!
//! This crate contains CLI definitions, output formatters,
//! the streaming renderer, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::ConsoleConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::StreamRenderer;
