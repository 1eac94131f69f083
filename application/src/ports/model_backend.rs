//! Model backend port
//!
//! Defines the single-turn contract every hosted model is reached through.

use async_trait::async_trait;
use council_domain::ModelRole;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a backend invocation.
///
/// Authentication failures, rate limiting, timeouts, transport errors and
/// malformed provider responses all collapse into this one error; the
/// category only shapes the textual `cause`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{backend}: {cause}")]
pub struct BackendError {
    /// Label of the backend that failed
    pub backend: String,
    pub cause: String,
}

impl BackendError {
    pub fn new(backend: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            cause: cause.into(),
        }
    }

    pub fn auth(backend: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::new(backend, format!("authentication failed: {}", detail))
    }

    pub fn rate_limited(backend: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::new(backend, format!("rate limited: {}", detail))
    }

    pub fn timeout(backend: impl Into<String>) -> Self {
        Self::new(backend, "request timed out")
    }

    pub fn transport(backend: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::new(backend, format!("transport error: {}", detail))
    }

    pub fn malformed(backend: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::new(backend, format!("malformed provider response: {}", detail))
    }
}

/// A hosted language model reachable with one system instruction and one
/// user message.
///
/// Implementations hold their own credentials and model identifier, keep no
/// multi-turn state, and perform no retries. Implementations live in the
/// infrastructure layer.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Human-readable label, reported as the source of an analysis
    fn label(&self) -> &str;

    /// Send one system instruction and one user message, returning the
    /// response text.
    async fn invoke(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, BackendError>;
}

/// The three role-bound backend handles.
///
/// The role → backend mapping is fixed at construction.
#[derive(Clone)]
pub struct CouncilBackends {
    style: Arc<dyn ModelBackend>,
    coherence: Arc<dyn ModelBackend>,
    structure: Arc<dyn ModelBackend>,
}

impl CouncilBackends {
    pub fn new(
        style: Arc<dyn ModelBackend>,
        coherence: Arc<dyn ModelBackend>,
        structure: Arc<dyn ModelBackend>,
    ) -> Self {
        Self {
            style,
            coherence,
            structure,
        }
    }

    /// Backend bound to a role
    pub fn get(&self, role: ModelRole) -> &Arc<dyn ModelBackend> {
        match role {
            ModelRole::Style => &self.style,
            ModelRole::Coherence => &self.coherence,
            ModelRole::Structure => &self.structure,
        }
    }
}

impl std::fmt::Debug for CouncilBackends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouncilBackends")
            .field("style", &self.style.label())
            .field("coherence", &self.coherence.label())
            .field("structure", &self.structure.label())
            .finish()
    }
}
