//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for ALLAR AI.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
