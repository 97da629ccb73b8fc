//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: available generative-language models
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
