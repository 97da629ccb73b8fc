//! Gemini provider adapter
//!
//! Streams replies from the Generative Language API over server-sent events.

pub mod gateway;
pub mod sse;
pub mod types;

pub use gateway::GeminiGateway;
