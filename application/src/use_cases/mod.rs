//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod in_flight;
pub mod submit_prompt;
pub mod workspace;
