//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on use.

mod console;
mod gemini;
mod generation;
mod logging;

pub use console::FileConsoleConfig;
pub use gemini::{API_KEY_ENV_FALLBACKS, DEFAULT_GEMINI_BASE_URL, FileGeminiConfig};
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;

use allar_application::GenerationParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("generation.temperature must be within 0.0..=2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("generation.max_output_tokens cannot be 0")]
    ZeroMaxOutputTokens,

    #[error("gemini.model cannot be empty")]
    EmptyModelName,

    #[error("gemini.base_url must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoint, credentials and model
    pub gemini: FileGeminiConfig,
    /// Sampling settings and persona override
    pub generation: FileGenerationConfig,
    /// Terminal settings
    pub console: FileConsoleConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let temperature = self.generation.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            issues.push(ConfigValidationError::InvalidTemperature(temperature));
        }
        if self.generation.max_output_tokens == 0 {
            issues.push(ConfigValidationError::ZeroMaxOutputTokens);
        }
        if self.gemini.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        let base_url = self.gemini.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            issues.push(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        issues
    }

    /// Parameters for every generation request.
    pub fn generation_params(&self) -> GenerationParams {
        self.generation.to_params(self.gemini.parse_model())
    }
}
