//! Console configuration from TOML (`[console]` section)

use serde::{Deserialize, Serialize};

/// Raw console configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsoleConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while waiting for the first fragment
    pub show_spinner: bool,
    /// Path to the line-editor history file
    pub history_file: Option<String>,
}

impl Default for FileConsoleConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_spinner: true,
            history_file: None,
        }
    }
}
