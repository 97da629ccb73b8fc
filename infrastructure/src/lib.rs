//! Infrastructure layer for allar-ai
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileConsoleConfig, FileGeminiConfig,
    FileGenerationConfig, FileLoggingConfig,
};
pub use gemini::GeminiGateway;
pub use logging::JsonlConversationLogger;
pub use providers::{OfflineGateway, ProviderKind, select_gateway};
