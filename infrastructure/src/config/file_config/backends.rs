//! Backend configuration from TOML (`[backends.*]` sections)
//!
//! Every field is optional. Unset fields fall back to the role's default
//! provider and then to that provider's defaults:
//!
//! ```toml
//! [backends.style]
//! provider = "anthropic"          # anthropic | openai | gemini
//! model = "claude-3-5-sonnet-20240620"
//! label = "Claude"
//! api_key_env = "ANTHROPIC_API_KEY"
//! max_tokens = 4096
//! timeout_seconds = 120
//! ```

use crate::config::error::ConfigError;
use crate::providers::{HttpBackendSettings, ProviderKind};
use council_domain::ModelRole;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Raw configuration for one role's backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Display label reported as the source of an analysis
    pub label: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use an env var instead)
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

impl FileBackendConfig {
    /// Resolve the provider, falling back to the role's default
    pub fn parse_provider(&self, role: ModelRole) -> Result<ProviderKind, ConfigError> {
        match &self.provider {
            Some(name) => name
                .parse()
                .map_err(|message| ConfigError::UnknownProvider { role, message }),
            None => Ok(default_provider(role)),
        }
    }

    /// Resolve every setting for `role`, reading the API key through `env`.
    ///
    /// A blank key counts as missing so that no request is ever sent
    /// without credentials.
    pub fn resolve(
        &self,
        role: ModelRole,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(ProviderKind, HttpBackendSettings), ConfigError> {
        let provider = self.parse_provider(role)?;
        let api_key_env = self
            .api_key_env
            .clone()
            .unwrap_or_else(|| provider.default_api_key_env().to_string());

        let api_key = self
            .api_key
            .clone()
            .or_else(|| env(&api_key_env))
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey {
                role,
                env: api_key_env,
            })?;

        let settings = HttpBackendSettings {
            label: self
                .label
                .clone()
                .unwrap_or_else(|| provider.default_label().to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key,
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout: Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
        };

        Ok((provider, settings))
    }
}

/// Provider serving a role when none is configured
pub fn default_provider(role: ModelRole) -> ProviderKind {
    match role {
        ModelRole::Style => ProviderKind::Anthropic,
        ModelRole::Coherence => ProviderKind::Gemini,
        ModelRole::Structure => ProviderKind::OpenAi,
    }
}

/// The three role-bound backend sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendsConfig {
    pub style: FileBackendConfig,
    pub coherence: FileBackendConfig,
    pub structure: FileBackendConfig,
}

impl FileBackendsConfig {
    pub fn get(&self, role: ModelRole) -> &FileBackendConfig {
        match role {
            ModelRole::Style => &self.style,
            ModelRole::Coherence => &self.coherence,
            ModelRole::Structure => &self.structure,
        }
    }
}
