//! Activation mode definitions for the council.
//!
//! Each [`ActivationMode`] selects a distinct call pattern over the three
//! role-bound backends:
//!
//! ```text
//! Flow   ── Coherence ──────────────────────────────▶ Option<ConsistencyAlert>
//! Doubt  ── Structure ──────────────────────────────▶ AnalysisResult
//! Polish ─┬ Style     ─┐
//!         ├ Coherence ─┼─▶ barrier ─▶ Synthesis ───▶ PolishReport
//!         └ Structure ─┘
//! ```

use super::error::DomainError;
use super::role::ModelRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orchestration pattern for a single council request. Immutable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Passive continuity monitoring while the author writes
    Flow,
    /// A specific structural question from the author
    Doubt,
    /// Full three-way review followed by synthesis
    Polish,
}

impl ActivationMode {
    /// Roles whose backends are consulted for the analysis stage of this mode.
    pub fn roles(&self) -> &'static [ModelRole] {
        match self {
            ActivationMode::Flow => &[ModelRole::Coherence],
            ActivationMode::Doubt => &[ModelRole::Structure],
            ActivationMode::Polish => &ModelRole::ALL,
        }
    }

    /// Whether this mode ends with a synthesis call
    pub fn synthesizes(&self) -> bool {
        matches!(self, ActivationMode::Polish)
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            ActivationMode::Flow => "Flow: passive consistency check (Coherence leads)",
            ActivationMode::Doubt => "Doubt: structural answer to an author question (Structure leads)",
            ActivationMode::Polish => "Polish: full three-way review with synthesis",
        }
    }
}

impl fmt::Display for ActivationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationMode::Flow => write!(f, "flow"),
            ActivationMode::Doubt => write!(f, "doubt"),
            ActivationMode::Polish => write!(f, "polish"),
        }
    }
}

impl std::str::FromStr for ActivationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flow" => Ok(ActivationMode::Flow),
            "doubt" => Ok(ActivationMode::Doubt),
            "polish" => Ok(ActivationMode::Polish),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}
