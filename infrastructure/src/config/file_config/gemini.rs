//! Gemini provider configuration from TOML (`[gemini]` section)

use allar_domain::Model;
use serde::{Deserialize, Serialize};

/// Default endpoint prefix; the model name and method are appended.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the key when none is configured, in order.
pub const API_KEY_ENV_FALLBACKS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Direct API key (prefer `ALLAR_GEMINI__API_KEY` or `GEMINI_API_KEY`).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Model name, e.g. "gemini-3-flash-preview".
    pub model: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: Model::default().to_string(),
        }
    }
}

impl FileGeminiConfig {
    pub fn parse_model(&self) -> Model {
        self.model.trim().parse().unwrap_or_default()
    }

    /// The configured key, or the first non-empty fallback variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        self.api_key
            .iter()
            .cloned()
            .chain(API_KEY_ENV_FALLBACKS.iter().filter_map(|name| lookup(name)))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}
