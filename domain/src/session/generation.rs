//! Lifecycle of a single generation.
//!
//! ```text
//! Idle -> HistoryCaptured -> Streaming -> { Completed | Failed }
//! ```
//!
//! Store mutations for the placeholder happen only while `Streaming`. Both
//! terminal phases release the process-wide in-flight slot.

use serde::{Deserialize, Serialize};

/// Phase of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    Idle,
    HistoryCaptured,
    Streaming,
    Completed,
    Failed,
}

impl GenerationPhase {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: GenerationPhase) -> bool {
        use GenerationPhase::*;
        matches!(
            (self, next),
            (Idle, HistoryCaptured)
                | (HistoryCaptured, Streaming)
                | (HistoryCaptured, Failed)
                | (Streaming, Completed)
                | (Streaming, Failed)
                | (Completed, Idle)
                | (Failed, Idle)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GenerationPhase::Completed | GenerationPhase::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationPhase::Idle => "idle",
            GenerationPhase::HistoryCaptured => "history_captured",
            GenerationPhase::Streaming => "streaming",
            GenerationPhase::Completed => "completed",
            GenerationPhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a generation ended.
///
/// A failure keeps whatever content the placeholder last reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Completed,
    Failed(String),
}

impl GenerationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, GenerationOutcome::Completed)
    }

    pub fn phase(&self) -> GenerationPhase {
        match self {
            GenerationOutcome::Completed => GenerationPhase::Completed,
            GenerationOutcome::Failed(_) => GenerationPhase::Failed,
        }
    }
}
