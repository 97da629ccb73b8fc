//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters and the
//! presentation layer implement.

pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
