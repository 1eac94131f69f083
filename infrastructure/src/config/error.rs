//! Configuration errors

use council_domain::ModelRole;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid provider for the {role} backend: {message}")]
    UnknownProvider { role: ModelRole, message: String },

    #[error("No API key for the {role} backend: set {env} or backends.{role}.api_key")]
    MissingApiKey { role: ModelRole, env: String },

    #[error("Failed to build HTTP client for the {role} backend: {source}")]
    HttpClient {
        role: ModelRole,
        #[source]
        source: reqwest::Error,
    },
}
