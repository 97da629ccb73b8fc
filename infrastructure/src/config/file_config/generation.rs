//! Generation configuration from TOML (`[generation]` section)

use allar_application::GenerationParams;
use allar_application::config::generation_params::{
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};
use allar_domain::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Replaces the built-in persona when set.
    pub system_instruction: Option<String>,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            system_instruction: None,
        }
    }
}

impl FileGenerationConfig {
    pub fn to_params(&self, model: Model) -> GenerationParams {
        let params = GenerationParams::default()
            .with_model(model)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens);
        match &self.system_instruction {
            Some(text) if !text.trim().is_empty() => params.with_system_instruction(text.clone()),
            _ => params,
        }
    }
}
