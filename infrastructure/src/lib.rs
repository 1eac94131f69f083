//! Infrastructure layer for editorial-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP model backends, the style reference
//! loader, and configuration file loading.

pub mod config;
pub mod providers;
pub mod style_reference;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileBackendConfig, FileBackendsConfig, FileConfig,
    FileCouncilConfig, FileOutputConfig, build_backends, build_backends_with,
};
pub use providers::{
    AnthropicBackend, GeminiBackend, HttpBackendSettings, OpenAiBackend, ProviderKind,
    build_backend,
};
pub use style_reference::StyleReferenceLoader;
