//! LLM Gateway port
//!
//! Defines the single capability the application needs from a
//! text-generation provider: stream a reply for a prompt given the prior turns.

use allar_domain::{Model, StreamEvent};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Role tags in the provider's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

/// One prior turn sent along with a new prompt: role tag and text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: TurnRole,
    pub text: String,
}

impl HistoryTurn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Gateway for text generation
///
/// This port defines how the application layer talks to a generative-language
/// provider. Persona, temperature and the output-token ceiling are fixed when
/// the adapter is built, not per call.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// The model replies are generated with.
    fn model(&self) -> &Model;

    /// Start streaming a reply to `prompt` given the earlier `history`.
    ///
    /// An `Err` means the request never started; failures after that arrive
    /// as a [`StreamEvent::Error`] on the returned handle.
    async fn stream_chat(
        &self,
        history: &[HistoryTurn],
        prompt: &str,
    ) -> Result<StreamHandle, GatewayError>;
}

/// Handle for receiving streaming events for one reply.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. Single pass: once drained it
/// cannot be restarted.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A sender/handle pair with the given buffer size.
    pub fn channel(capacity: usize) -> (mpsc::Sender<StreamEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx))
    }

    /// A handle that yields `fragments` as deltas and then completes.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let events: Vec<StreamEvent> = fragments
            .into_iter()
            .map(|f| StreamEvent::Delta(f.into()))
            .chain(std::iter::once(StreamEvent::Completed))
            .collect();
        let (tx, handle) = Self::channel(events.len());
        for event in events {
            // Capacity covers every event, so this never waits
            let _ = tx.try_send(event);
        }
        handle
    }

    /// Next event, or `None` once the producer has gone away.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed => return Ok(full_text),
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }
        // Channel closed without Completed: return what we have
        Ok(full_text)
    }
}
