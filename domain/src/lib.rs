//! Domain layer for allar-ai
//!
//! This crate contains the chat entities, the in-memory session store and the
//! value objects shared by every other layer. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: an ordered conversation thread, newest first in the store
//! - **Message**: one `user` or `assistant` turn; only its content ever changes
//! - **Placeholder**: the empty assistant message filled in as fragments stream in

pub mod core;
pub mod identity;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model};
pub use identity::{ProfileUpdate, UserProfile};
pub use prompt::PromptTemplate;
pub use session::{
    entities::{Message, MessageId, Role, Session, SessionId},
    generation::{GenerationOutcome, GenerationPhase},
    store::SessionStore,
    stream::StreamEvent,
    title::{DEFAULT_SESSION_TITLE, SessionTitle, TITLE_MAX_CHARS},
};
