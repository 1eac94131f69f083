//! Configuration loading for editorial-council
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/editorial-council/config.toml`
//! 5. Default values

mod assemble;
mod error;
mod file_config;
mod loader;

pub use assemble::{build_backends, build_backends_with};
pub use error::ConfigError;
pub use file_config::{
    DEFAULT_MAX_TOKENS, DEFAULT_STYLE_REFERENCE_FILE, DEFAULT_TIMEOUT_SECONDS, FileBackendConfig,
    FileBackendsConfig, FileConfig, FileCouncilConfig, FileOutputConfig, default_provider,
};
pub use loader::ConfigLoader;
