//! Submit Prompt use case.
//!
//! [`GenerationController`] turns one user prompt into committed store
//! mutations plus a driven reply stream:
//!
//! 1. Reject blank prompts and any submission while a generation is in flight
//! 2. Create a session when none is targeted
//! 3. Snapshot the target's messages as history, then append the user message
//!    and an empty assistant placeholder as one batch
//! 4. Stream the reply, writing the full accumulated text into the
//!    placeholder after every fragment
//! 5. Release the in-flight slot however the stream ends
//!
//! Steps 1–3 are synchronous ([`GenerationController::begin`]) so the caller
//! can adopt the target session and redraw before any network wait; step 4 is
//! [`GenerationController::drive`].

use super::in_flight::{InFlightGuard, InFlightSlot};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{HistoryTurn, LlmGateway, TurnRole};
use crate::ports::progress::GenerationProgress;
use crate::store::SharedSessionStore;
use allar_domain::util::preview;
use allar_domain::{
    DomainError, GenerationOutcome, GenerationPhase, Message, MessageId, Role, SessionId,
    SessionTitle, StreamEvent,
};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A submission whose messages are committed but whose reply has not streamed.
///
/// Holds the in-flight slot; dropping it without calling
/// [`GenerationController::drive`] releases the slot and leaves the
/// placeholder empty.
#[derive(Debug)]
pub struct PendingGeneration {
    session_id: SessionId,
    placeholder_id: MessageId,
    history: Vec<HistoryTurn>,
    prompt: String,
    created_session: bool,
    guard: InFlightGuard,
}

impl PendingGeneration {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn placeholder_id(&self) -> &MessageId {
        &self.placeholder_id
    }

    pub fn history(&self) -> &[HistoryTurn] {
        &self.history
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether the submission had to create its target session.
    pub fn created_session(&self) -> bool {
        self.created_session
    }
}

/// How a driven generation went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub session_id: SessionId,
    pub placeholder_id: MessageId,
    /// Number of fragments received.
    pub fragments: usize,
    /// Concatenation of every fragment received, in order.
    pub content: String,
    pub outcome: GenerationOutcome,
}

/// Orchestrates prompt submission and reply streaming.
#[derive(Clone)]
pub struct GenerationController {
    gateway: Arc<dyn LlmGateway>,
    store: SharedSessionStore,
    in_flight: InFlightSlot,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl GenerationController {
    pub fn new(gateway: Arc<dyn LlmGateway>, store: SharedSessionStore) -> Self {
        Self {
            gateway,
            store,
            in_flight: InFlightSlot::new(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn store(&self) -> &SharedSessionStore {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<dyn LlmGateway> {
        &self.gateway
    }

    pub fn in_flight(&self) -> &InFlightSlot {
        &self.in_flight
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Validate, claim the in-flight slot, and commit the prompt/placeholder pair.
    ///
    /// Rejections (`EmptyPrompt`, `GenerationInFlight`) and a stale `target`
    /// (`SessionNotFound`) leave the store untouched.
    pub fn begin(
        &self,
        prompt: &str,
        target: Option<&SessionId>,
    ) -> Result<PendingGeneration, DomainError> {
        if prompt.trim().is_empty() {
            debug!("Rejected blank prompt");
            return Err(DomainError::EmptyPrompt);
        }

        let guard = self.in_flight.try_acquire().ok_or_else(|| {
            debug!("Rejected prompt: generation already in flight");
            DomainError::GenerationInFlight
        })?;

        let (session_id, history, created_session) = match target {
            Some(id) => {
                let session = self
                    .store
                    .snapshot(id)
                    .ok_or_else(|| DomainError::SessionNotFound(id.to_string()))?;
                (id.clone(), Self::history_of(session.messages()), false)
            }
            None => {
                let id = self.store.create_session(SessionTitle::default());
                debug!(session_id = %id, "Created session for first prompt");
                (id, Vec::new(), true)
            }
        };

        let (user, placeholder) = Message::exchange(prompt);
        let placeholder_id = placeholder.id().clone();
        self.store
            .append_messages(&session_id, vec![user, placeholder])?;

        info!(
            session_id = %session_id,
            history_turns = history.len(),
            "Prompt submitted: {}",
            preview(prompt, 60)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "prompt_submitted",
            serde_json::json!({
                "session_id": session_id.as_str(),
                "placeholder_id": placeholder_id.as_str(),
                "prompt": prompt,
                "history_turns": history.len(),
            }),
        ));

        Ok(PendingGeneration {
            session_id,
            placeholder_id,
            history,
            prompt: prompt.to_string(),
            created_session,
            guard,
        })
    }

    /// Stream the reply for `pending` into its placeholder.
    ///
    /// Never fails: a provider error ends the generation as
    /// [`GenerationOutcome::Failed`] with the placeholder left at whatever it
    /// last reached. The in-flight slot is released before
    /// [`GenerationProgress::on_generation_end`] fires.
    pub async fn drive(
        &self,
        pending: PendingGeneration,
        progress: &dyn GenerationProgress,
    ) -> GenerationReport {
        let PendingGeneration {
            session_id,
            placeholder_id,
            history,
            prompt,
            guard,
            ..
        } = pending;

        let mut phase = GenerationPhase::Idle;
        advance(&mut phase, GenerationPhase::HistoryCaptured, progress);
        progress.on_generation_start(&session_id, &placeholder_id);

        let mut content = String::new();
        let mut fragments = 0usize;

        let outcome = match self.gateway.stream_chat(&history, &prompt).await {
            Err(e) => GenerationOutcome::Failed(e.to_string()),
            Ok(mut stream) => {
                advance(&mut phase, GenerationPhase::Streaming, progress);
                loop {
                    match stream.next_event().await {
                        Some(StreamEvent::Delta(chunk)) => {
                            fragments += 1;
                            content.push_str(&chunk);
                            self.apply(&session_id, &placeholder_id, &content, progress);
                        }
                        // A producer that goes away without a terminal event has
                        // simply run out of fragments
                        Some(StreamEvent::Completed) | None => break GenerationOutcome::Completed,
                        Some(StreamEvent::Error(e)) => break GenerationOutcome::Failed(e),
                    }
                }
            }
        };

        drop(guard);
        advance(&mut phase, outcome.phase(), progress);

        match &outcome {
            GenerationOutcome::Completed => {
                info!(
                    session_id = %session_id,
                    fragments,
                    chars = content.chars().count(),
                    "Generation completed"
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "generation_completed",
                    serde_json::json!({
                        "session_id": session_id.as_str(),
                        "placeholder_id": placeholder_id.as_str(),
                        "fragments": fragments,
                        "content": content,
                    }),
                ));
            }
            GenerationOutcome::Failed(reason) => {
                warn!(
                    session_id = %session_id,
                    fragments,
                    "Generation failed: {}",
                    reason
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "generation_failed",
                    serde_json::json!({
                        "session_id": session_id.as_str(),
                        "placeholder_id": placeholder_id.as_str(),
                        "fragments": fragments,
                        "partial_content": content,
                        "error": reason,
                    }),
                ));
            }
        }

        progress.on_generation_end(&outcome);
        advance(&mut phase, GenerationPhase::Idle, progress);

        GenerationReport {
            session_id,
            placeholder_id,
            fragments,
            content,
            outcome,
        }
    }

    /// [`begin`](Self::begin) followed by [`drive`](Self::drive).
    pub async fn submit_prompt(
        &self,
        prompt: &str,
        target: Option<&SessionId>,
        progress: &dyn GenerationProgress,
    ) -> Result<GenerationReport, DomainError> {
        let pending = self.begin(prompt, target)?;
        Ok(self.drive(pending, progress).await)
    }

    /// Write the accumulated text into the placeholder. A stale target is a
    /// silent no-op: the stream keeps being consumed.
    fn apply(
        &self,
        session_id: &SessionId,
        placeholder_id: &MessageId,
        content: &str,
        progress: &dyn GenerationProgress,
    ) {
        match self
            .store
            .update_message_content(session_id, placeholder_id, content)
        {
            Ok(()) => progress.on_content_updated(session_id, placeholder_id, content),
            Err(e) => debug!("Dropped update for stale placeholder: {}", e),
        }
    }

    /// Map stored messages to the provider's role vocabulary.
    fn history_of(messages: &[Message]) -> Vec<HistoryTurn> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role() {
                    Role::User => TurnRole::User,
                    Role::Assistant => TurnRole::Model,
                };
                HistoryTurn::new(role, m.content())
            })
            .collect()
    }
}

fn advance(phase: &mut GenerationPhase, next: GenerationPhase, progress: &dyn GenerationProgress) {
    debug_assert!(
        phase.can_transition_to(next),
        "illegal generation transition {} -> {}",
        phase,
        next
    );
    trace!("Generation phase {} -> {}", phase, next);
    *phase = next;
    progress.on_phase_change(next);
}
