//! Progress notification port
//!
//! Defines how observers (the console renderer, tests) see a generation as
//! it happens. Every callback fires after the corresponding store mutation
//! has been applied, so an observer reading the store sees the same value.

use allar_domain::{GenerationOutcome, GenerationPhase, MessageId, SessionId};

/// Callback for updates while a reply streams into its placeholder
pub trait GenerationProgress: Send + Sync {
    /// Called once the prompt and placeholder are committed, before streaming.
    fn on_generation_start(&self, session_id: &SessionId, placeholder_id: &MessageId);

    /// Called after each applied update with the full accumulated content.
    fn on_content_updated(&self, session_id: &SessionId, message_id: &MessageId, content: &str);

    /// Called when the generation reaches a terminal phase.
    fn on_generation_end(&self, outcome: &GenerationOutcome);

    /// Called on every phase change. Optional.
    fn on_phase_change(&self, _phase: GenerationPhase) {}
}

/// No-op progress notifier for when nobody is watching
pub struct NoGenerationProgress;

impl GenerationProgress for NoGenerationProgress {
    fn on_generation_start(&self, _session_id: &SessionId, _placeholder_id: &MessageId) {}
    fn on_content_updated(&self, _session_id: &SessionId, _message_id: &MessageId, _content: &str) {}
    fn on_generation_end(&self, _outcome: &GenerationOutcome) {}
}
