//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backends;
mod council;
mod output;

pub use backends::{
    DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECONDS, FileBackendConfig, FileBackendsConfig,
    default_provider,
};
pub use council::{DEFAULT_STYLE_REFERENCE_FILE, FileCouncilConfig};
pub use output::FileOutputConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-bound backend settings
    pub backends: FileBackendsConfig,
    /// Council behavior settings
    pub council: FileCouncilConfig,
    /// Output settings
    pub output: FileOutputConfig,
}
