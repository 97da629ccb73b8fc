//! Prompt domain
//!
//! The persona system instruction and starter prompts.

mod template;

pub use template::PromptTemplate;
