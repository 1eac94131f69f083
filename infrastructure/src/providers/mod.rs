//! Hosted model adapters implementing [`ModelBackend`]
//!
//! One adapter per provider API. Each owns a `reqwest` client whose request
//! timeout bounds every call, sends exactly one request per invocation, and
//! never retries.

mod anthropic;
mod gemini;
mod http;
mod openai;

pub use anthropic::AnthropicBackend;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

use council_application::ModelBackend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Environment variable conventionally holding this provider's key
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
        }
    }

    /// Model used when a backend section names no model
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-3-5-sonnet-20240620",
            ProviderKind::OpenAi => "gpt-4o",
            ProviderKind::Gemini => "gemini-1.5-pro",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "Claude",
            ProviderKind::OpenAi => "GPT",
            ProviderKind::Gemini => "Gemini",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "openai" | "gpt" => Ok(ProviderKind::OpenAi),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => Err(format!(
                "unknown provider '{}' (expected anthropic, openai or gemini)",
                other
            )),
        }
    }
}

/// Everything an HTTP adapter needs, fully resolved
#[derive(Clone)]
pub struct HttpBackendSettings {
    /// Reported as the source of an analysis
    pub label: String,
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl fmt::Debug for HttpBackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackendSettings")
            .field("label", &self.label)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
impl HttpBackendSettings {
    pub(crate) fn for_test(base_url: &str) -> Self {
        Self {
            label: "test-backend".to_string(),
            model: "test-model".to_string(),
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            max_tokens: 256,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Construct the adapter for `kind`
pub fn build_backend(
    kind: ProviderKind,
    settings: HttpBackendSettings,
) -> Result<Arc<dyn ModelBackend>, reqwest::Error> {
    Ok(match kind {
        ProviderKind::Anthropic => Arc::new(AnthropicBackend::new(settings)?),
        ProviderKind::OpenAi => Arc::new(OpenAiBackend::new(settings)?),
        ProviderKind::Gemini => Arc::new(GeminiBackend::new(settings)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("Anthropic".parse::<ProviderKind>(), Ok(ProviderKind::Anthropic));
        assert_eq!("openai".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!(" google ".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(ProviderKind::Gemini.default_api_key_env(), "GOOGLE_API_KEY");
        assert_eq!(ProviderKind::OpenAi.to_string(), "openai");
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let debug = format!("{:?}", HttpBackendSettings::for_test("http://localhost"));
        assert!(!debug.contains("test-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_build_backend_uses_label() {
        let backend = build_backend(
            ProviderKind::Gemini,
            HttpBackendSettings::for_test("http://localhost"),
        )
        .unwrap();
        assert_eq!(backend.label(), "test-backend");
    }
}
