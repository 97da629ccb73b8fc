//! Offline gateway: a canned reply streamed word by word.
//!
//! Lets the console run end to end without network access or an API key.

use allar_application::{GatewayError, HistoryTurn, LlmGateway, StreamHandle};
use allar_domain::util::preview;
use allar_domain::{Model, StreamEvent};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const DEFAULT_WORD_DELAY: Duration = Duration::from_millis(35);

pub struct OfflineGateway {
    model: Model,
    word_delay: Duration,
}

impl Default for OfflineGateway {
    fn default() -> Self {
        Self {
            model: Model::Custom("offline".to_string()),
            word_delay: DEFAULT_WORD_DELAY,
        }
    }
}

impl OfflineGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_delay(mut self, delay: Duration) -> Self {
        self.word_delay = delay;
        self
    }

    /// The full reply for `prompt` given `history_turns` earlier turns.
    pub fn reply_for(prompt: &str, history_turns: usize) -> String {
        format!(
            "ALLAR ENGINE is running offline, so this is a rehearsal reply rather than live analysis. \
             Brief received: \"{}\" with {} earlier turn(s) in context. \
             Configure a Gemini API key to receive the full strategic breakdown.",
            preview(prompt, 60),
            history_turns
        )
    }
}

#[async_trait]
impl LlmGateway for OfflineGateway {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn stream_chat(
        &self,
        history: &[HistoryTurn],
        prompt: &str,
    ) -> Result<StreamHandle, GatewayError> {
        let reply = Self::reply_for(prompt, history.len());
        let delay = self.word_delay;
        let (tx, handle) = StreamHandle::channel(16);

        tokio::spawn(async move {
            for word in reply.split_inclusive(' ') {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if tx.send(StreamEvent::Delta(word.to_string())).await.is_err() {
                    debug!("Offline stream receiver dropped");
                    return;
                }
            }
            let _ = tx.send(StreamEvent::Completed).await;
        });

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn streams_the_canned_reply_word_by_word() {
        let gateway = OfflineGateway::new().with_word_delay(Duration::ZERO);
        let history = vec![HistoryTurn::new(allar_application::TurnRole::User, "earlier")];

        let mut handle = gateway.stream_chat(&history, "Plan a GTM launch").await.unwrap();
        let mut fragments = Vec::new();
        let mut completed = false;
        while let Some(event) = handle.next_event().await {
            match event {
                StreamEvent::Delta(text) => fragments.push(text),
                StreamEvent::Completed => completed = true,
                StreamEvent::Error(e) => panic!("unexpected error: {}", e),
            }
        }

        assert!(completed);
        assert!(fragments.len() > 5);
        assert_eq!(
            fragments.concat(),
            OfflineGateway::reply_for("Plan a GTM launch", 1)
        );
    }

    #[test]
    fn reply_mentions_the_brief() {
        let reply = OfflineGateway::reply_for("Structure a Series A pitch", 0);
        assert!(reply.contains("Structure a Series A pitch"));
    }
}
