//! Consistency alert entity produced by Flow mode

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How urgently an inconsistency should be surfaced to the author
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(DomainError::InvalidSeverity(other.to_string())),
        }
    }
}

/// A continuity problem flagged by the Coherence backend.
///
/// `kind` is a free-form category such as `temporal`, `spatial`,
/// `character` or `plot`. Flow mode returns `Option<ConsistencyAlert>`;
/// `None` (nothing flagged) is distinct from a low-severity alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyAlert {
    pub kind: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ConsistencyAlert {
    /// Category used when the model flags something without saying what.
    pub const DEFAULT_KIND: &'static str = "plot";

    pub fn new(kind: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            severity,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_default_is_low() {
        assert_eq!(Severity::default(), Severity::Low);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("HIGH".parse::<Severity>().ok(), Some(Severity::High));
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_alert_serialization_skips_missing_suggestion() {
        let alert = ConsistencyAlert::new("temporal", Severity::Medium, "Dates disagree");
        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains("\"severity\":\"medium\""));
        assert!(!json.contains("suggestion"));
    }
}
