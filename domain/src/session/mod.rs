//! Chat session domain.
//!
//! - [`entities::Session`]: a conversation thread
//! - [`entities::Message`]: a single turn within a session
//! - [`store::SessionStore`]: ordered in-memory collection of sessions
//! - [`stream::StreamEvent`]: one item of a streamed reply
//! - [`generation::GenerationPhase`]: lifecycle of one generation

pub mod entities;
pub mod generation;
pub mod store;
pub mod stream;
pub mod title;
