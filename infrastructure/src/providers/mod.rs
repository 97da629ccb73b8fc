//! Provider selection
//!
//! Picks the text-generation adapter for this run from configuration:
//! the Gemini API when a key is available, the offline gateway otherwise.

pub mod offline;

pub use offline::OfflineGateway;

use crate::config::FileConfig;
use crate::gemini::GeminiGateway;
use allar_application::{GatewayError, LlmGateway};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Offline,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Offline => "offline",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the gateway for this run.
///
/// `force_offline` skips the network entirely. Without it, a missing key
/// falls back to the offline gateway with a warning.
pub fn select_gateway(
    config: &FileConfig,
    force_offline: bool,
) -> Result<(Arc<dyn LlmGateway>, ProviderKind), GatewayError> {
    select_gateway_with_key(config, force_offline, config.gemini.resolve_api_key())
}

fn select_gateway_with_key(
    config: &FileConfig,
    force_offline: bool,
    api_key: Option<String>,
) -> Result<(Arc<dyn LlmGateway>, ProviderKind), GatewayError> {
    if force_offline {
        return Ok((Arc::new(OfflineGateway::new()), ProviderKind::Offline));
    }

    let Some(api_key) = api_key else {
        warn!("No Gemini API key configured; using the offline gateway");
        return Ok((Arc::new(OfflineGateway::new()), ProviderKind::Offline));
    };

    let gateway = GeminiGateway::new(api_key, config.generation_params())?
        .with_base_url(config.gemini.base_url.trim());
    Ok((Arc::new(gateway), ProviderKind::Gemini))
}
