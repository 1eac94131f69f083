//! Model role value object

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the three analytical personas of the council.
///
/// Each role is bound to exactly one model backend and exactly one system
/// prompt. The binding is fixed when the council is constructed and never
/// changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelRole {
    /// Prose density, syntax and authorial voice
    Style,
    /// Continuity and fact-checking against the manuscript
    Coherence,
    /// Causality, subtext and narrative tension
    Structure,
}

impl ModelRole {
    /// All roles in presentation order.
    pub const ALL: [ModelRole; 3] = [ModelRole::Style, ModelRole::Coherence, ModelRole::Structure];

    /// Get the string identifier for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Style => "style",
            ModelRole::Coherence => "coherence",
            ModelRole::Structure => "structure",
        }
    }

    /// Human-readable persona name
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelRole::Style => "Style Consultant",
            ModelRole::Coherence => "Coherence Guardian",
            ModelRole::Structure => "Structure Architect",
        }
    }
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "style" => Ok(ModelRole::Style),
            "coherence" => Ok(ModelRole::Coherence),
            "structure" => Ok(ModelRole::Structure),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl Serialize for ModelRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
