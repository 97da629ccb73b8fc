//! Session title value object

use crate::util::take_chars;
use serde::{Deserialize, Serialize};

/// Maximum number of characters taken from a prompt to build a title.
pub const TITLE_MAX_CHARS: usize = 20;

/// Title given to sessions opened with the new-chat action.
pub const DEFAULT_SESSION_TITLE: &str = "STRATEGIC BRIEF";

/// Short human label of a session.
///
/// A `Placeholder` is replaced by a prompt-derived title on the session's
/// first append; an `Explicit` title is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum SessionTitle {
    Placeholder(String),
    Explicit(String),
}

impl SessionTitle {
    pub fn placeholder(text: impl Into<String>) -> Self {
        SessionTitle::Placeholder(text.into())
    }

    pub fn explicit(text: impl Into<String>) -> Self {
        SessionTitle::Explicit(text.into())
    }

    /// First [`TITLE_MAX_CHARS`] characters of the prompt, upper-cased.
    pub fn from_prompt(prompt: &str) -> Self {
        SessionTitle::Explicit(take_chars(prompt, TITLE_MAX_CHARS).to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        match self {
            SessionTitle::Placeholder(s) | SessionTitle::Explicit(s) => s,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, SessionTitle::Explicit(_))
    }
}

impl Default for SessionTitle {
    fn default() -> Self {
        SessionTitle::Placeholder(DEFAULT_SESSION_TITLE.to_string())
    }
}

impl std::fmt::Display for SessionTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
