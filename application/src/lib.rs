//! Application layer for allar-ai
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod store;
pub mod use_cases;

// Re-export commonly used types
pub use config::GenerationParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, HistoryTurn, LlmGateway, StreamHandle, TurnRole},
    progress::{GenerationProgress, NoGenerationProgress},
};
pub use store::SharedSessionStore;
pub use use_cases::in_flight::{InFlightGuard, InFlightSlot};
pub use use_cases::submit_prompt::{GenerationController, GenerationReport, PendingGeneration};
pub use use_cases::workspace::{
    ChatWorkspace, DASHBOARD_TITLE, EMPTY_SIDEBAR_TEXT, SessionSummary, WorkspaceError,
};
