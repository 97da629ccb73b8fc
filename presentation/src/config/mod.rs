//! Presentation-level configuration
//!
//! Configuration for console rendering and REPL behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Console configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while waiting for the first fragment
    pub show_spinner: bool,
    /// Path to history file; `~/` is expanded
    pub history_file: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_spinner: true,
            history_file: None,
        }
    }
}

impl ConsoleConfig {
    /// Where line-editor history is kept, if anywhere.
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref().map(str::trim) {
            Some("") => None,
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("allar-ai").join("history.txt")),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_history_path_is_used() {
        let config = ConsoleConfig {
            history_file: Some("/tmp/allar-history.txt".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/allar-history.txt"))
        );
    }

    #[test]
    fn blank_history_path_disables_history() {
        let config = ConsoleConfig {
            history_file: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.history_path().is_none());
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/h.txt"), home.join("h.txt"));
        }
        assert_eq!(expand_home("rel/h.txt"), PathBuf::from("rel/h.txt"));
    }
}
