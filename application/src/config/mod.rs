//! Application-level configuration.
//!
//! - [`GenerationParams`]: model, persona, temperature and token ceiling

pub mod generation_params;

pub use generation_params::GenerationParams;
