//! Build the role-bound adapters from configuration

use super::error::ConfigError;
use super::file_config::FileBackendsConfig;
use crate::providers::build_backend;
use council_application::CouncilBackends;
use council_domain::ModelRole;
use tracing::debug;

/// Build all three backends, reading API keys from the process environment
pub fn build_backends(config: &FileBackendsConfig) -> Result<CouncilBackends, ConfigError> {
    build_backends_with(config, |name| std::env::var(name).ok())
}

/// Build all three backends, reading API keys through `env`.
///
/// Fails on the first role whose provider is unknown, whose key is missing,
/// or whose HTTP client cannot be built.
pub fn build_backends_with(
    config: &FileBackendsConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<CouncilBackends, ConfigError> {
    let build = |role: ModelRole| {
        let (provider, settings) = config.get(role).resolve(role, &env)?;
        debug!(
            %role,
            %provider,
            model = %settings.model,
            label = %settings.label,
            timeout_secs = settings.timeout.as_secs(),
            "Configuring backend"
        );
        build_backend(provider, settings).map_err(|source| ConfigError::HttpClient { role, source })
    };

    Ok(CouncilBackends::new(
        build(ModelRole::Style)?,
        build(ModelRole::Coherence)?,
        build(ModelRole::Structure)?,
    ))
}
