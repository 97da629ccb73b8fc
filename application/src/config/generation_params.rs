//! Generation parameters, fixed for the lifetime of a gateway.
//!
//! [`GenerationParams`] is handed to the gateway adapter when it is built.
//! None of it is adjustable at runtime from the console.

use allar_domain::{Model, PromptTemplate};
use serde::{Deserialize, Serialize};

/// Default sampling temperature; moderate, favouring determinism.
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default ceiling on tokens in one reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

/// Fixed parameters for every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model replies are generated with.
    pub model: Model,
    /// Persona and behavioural rules.
    pub system_instruction: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens in one reply.
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            system_instruction: PromptTemplate::persona_system().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_persona_settings() {
        let params = GenerationParams::default();
        assert_eq!(params.model, Model::Gemini3Flash);
        assert_eq!(params.temperature, 0.4);
        assert_eq!(params.max_output_tokens, 800);
        assert!(params.system_instruction.starts_with("You are ALLAR AI"));
    }

    #[test]
    fn builder_overrides() {
        let params = GenerationParams::default()
            .with_model(Model::Gemini25Pro)
            .with_temperature(0.1)
            .with_max_output_tokens(64)
            .with_system_instruction("Be brief.");
        assert_eq!(params.model, Model::Gemini25Pro);
        assert_eq!(params.temperature, 0.1);
        assert_eq!(params.max_output_tokens, 64);
        assert_eq!(params.system_instruction, "Be brief.");
    }
}
