//! Configuration file loading for allar-ai
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ALLAR_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./allar.toml` or `./.allar.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/allar-ai/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    API_KEY_ENV_FALLBACKS, ConfigValidationError, DEFAULT_GEMINI_BASE_URL, FileConfig,
    FileConsoleConfig, FileGeminiConfig, FileGenerationConfig, FileLoggingConfig,
};
pub use loader::ConfigLoader;
