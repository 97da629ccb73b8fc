//! Gemini LLM Gateway implementation

use super::sse::SseDecoder;
use super::types::{ApiErrorBody, GenerateContentRequest, GenerateContentResponse};
use allar_application::{GatewayError, GenerationParams, HistoryTurn, LlmGateway, StreamHandle};
use allar_domain::{Model, StreamEvent};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::Client;
use std::fmt::Display;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Buffered events between the reader task and the controller.
const STREAM_BUFFER: usize = 64;

/// LLM Gateway implementation for the Gemini `streamGenerateContent` API
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    base_url: String,
    params: GenerationParams,
}

impl GeminiGateway {
    /// Create a gateway for the public endpoint.
    pub fn new(api_key: impl Into<String>, params: GenerationParams) -> Result<Self, GatewayError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GatewayError::MissingCredentials(
                "Gemini API key is empty".to_string(),
            ));
        }

        info!("GeminiGateway initialized for {}", params.model);

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: crate::config::DEFAULT_GEMINI_BASE_URL.to_string(),
            params,
        })
    }

    /// Point the gateway at another endpoint prefix (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url.trim_end_matches('/'),
            self.params.model
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    fn model(&self) -> &Model {
        &self.params.model
    }

    async fn stream_chat(
        &self,
        history: &[HistoryTurn],
        prompt: &str,
    ) -> Result<StreamHandle, GatewayError> {
        let body = GenerateContentRequest::new(&self.params, history, prompt);
        debug!(
            "Sending {} content turns to {}",
            body.contents.len(),
            self.params.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status, detail
            )));
        }

        let (tx, handle) = StreamHandle::channel(STREAM_BUFFER);
        tokio::spawn(pump(Box::pin(response.bytes_stream()), tx));
        Ok(handle)
    }
}

/// Decode an SSE body into stream events, ending with exactly one terminal event.
///
/// Stops early, without a terminal event, once the receiving side is gone.
pub(crate) async fn pump<S, B, E>(mut body: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("Gemini stream interrupted: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };

        for payload in decoder.push(chunk.as_ref()) {
            match forward(&payload, &tx).await {
                Forwarded::Continue => {}
                Forwarded::Stop => return,
            }
        }
    }

    if let Some(payload) = decoder.finish() {
        if let Forwarded::Stop = forward(&payload, &tx).await {
            return;
        }
    }

    let _ = tx.send(StreamEvent::Completed).await;
}

enum Forwarded {
    Continue,
    Stop,
}

async fn forward(payload: &str, tx: &mpsc::Sender<StreamEvent>) -> Forwarded {
    trace!("Gemini SSE payload: {}", payload);

    let event = match serde_json::from_str::<GenerateContentResponse>(payload) {
        Err(e) => StreamEvent::Error(format!("Malformed stream payload: {}", e)),
        Ok(chunk) => {
            if let Some(error) = &chunk.error {
                StreamEvent::Error(error.message.clone())
            } else if let Some(reason) = chunk.block_reason() {
                StreamEvent::Error(format!("Prompt blocked: {}", reason))
            } else {
                let text = chunk.text();
                if text.is_empty() {
                    return Forwarded::Continue;
                }
                StreamEvent::Delta(text)
            }
        }
    };

    let terminal = event.is_terminal();
    if tx.send(event).await.is_err() {
        debug!("Stream receiver dropped; stopping Gemini reader");
        return Forwarded::Stop;
    }
    if terminal {
        Forwarded::Stop
    } else {
        Forwarded::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunks(parts: &[&str]) -> impl Stream<Item = Result<Vec<u8>, String>> + Unpin {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(p.as_bytes().to_vec()))
                .collect::<Vec<_>>(),
        )
    }

    async fn drain(body: impl Stream<Item = Result<Vec<u8>, String>> + Unpin) -> Vec<StreamEvent> {
        let (tx, mut handle) = StreamHandle::channel(16);
        pump(body, tx).await;
        let mut events = Vec::new();
        while let Some(event) = handle.next_event().await {
            events.push(event);
        }
        events
    }

    fn data(text: &str) -> String {
        format!(
            "data: {}\r\n\r\n",
            serde_json::json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
        )
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = GeminiGateway::new("  ", GenerationParams::default())
            .err()
            .unwrap();
        assert!(matches!(err, GatewayError::MissingCredentials(_)));
    }

    #[test]
    fn endpoint_targets_model_stream_method() {
        let gateway = GeminiGateway::new("key", GenerationParams::default())
            .unwrap()
            .with_base_url("http://localhost:9000/v1beta/");
        assert_eq!(
            gateway.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-3-flash-preview:streamGenerateContent?alt=sse"
        );
        assert_eq!(gateway.model(), &Model::Gemini3Flash);
    }

    #[tokio::test]
    async fn fragments_then_completed() {
        let first = data("Hi");
        let second = data(" there");
        let events = drain(chunks(&[&first, &second])).await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Hi".to_string()),
                StreamEvent::Delta(" there".to_string()),
                StreamEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn events_split_mid_payload_are_reassembled() {
        let whole = format!("{}{}", data("alpha"), data("beta"));
        let (a, b) = whole.split_at(whole.len() / 2 + 3);
        let events = drain(chunks(&[a, b])).await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("alpha".to_string()),
                StreamEvent::Delta("beta".to_string()),
                StreamEvent::Completed,
            ]
        );
    }

    #[tokio::test]
    async fn text_free_chunks_are_skipped() {
        let finish = "data: {\"candidates\":[{\"finishReason\":\"STOP\"}]}\n\n";
        let first = data("done");
        let events = drain(chunks(&[&first, finish])).await;
        assert_eq!(
            events,
            vec![StreamEvent::Delta("done".to_string()), StreamEvent::Completed]
        );
    }

    #[tokio::test]
    async fn malformed_payload_fails_mid_stream() {
        let first = data("partial");
        let events = drain(chunks(&[&first, "data: {not json\n\n", &data("never")])).await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], StreamEvent::Delta("partial".to_string()));
        assert!(matches!(&events[1], StreamEvent::Error(msg) if msg.starts_with("Malformed")));
    }

    #[tokio::test]
    async fn transport_error_fails_mid_stream() {
        let first = data("partial");
        let body = stream::iter(vec![
            Ok(first.into_bytes()),
            Err("connection reset".to_string()),
        ]);
        let events = drain(body).await;
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("partial".to_string()),
                StreamEvent::Error("connection reset".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn server_error_payload_fails_mid_stream() {
        let events = drain(chunks(&[
            "data: {\"error\":{\"code\":503,\"message\":\"overloaded\",\"status\":\"UNAVAILABLE\"}}\n\n",
        ]))
        .await;
        assert_eq!(events, vec![StreamEvent::Error("overloaded".to_string())]);
    }

    #[tokio::test]
    async fn blocked_prompt_fails() {
        let events = drain(chunks(&["data: {\"promptFeedback\":{\"blockReason\":\"SAFETY\"}}\n\n"])).await;
        assert_eq!(
            events,
            vec![StreamEvent::Error("Prompt blocked: SAFETY".to_string())]
        );
    }

    #[tokio::test]
    async fn unterminated_final_event_is_delivered() {
        let last = data("end");
        let events = drain(chunks(&[last.trim_end()])).await;
        assert_eq!(
            events,
            vec![StreamEvent::Delta("end".to_string()), StreamEvent::Completed]
        );
    }
}
