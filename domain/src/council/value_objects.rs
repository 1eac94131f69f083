//! Council value objects - immutable results of each activation mode.
//!
//! - [`AnalysisResult`] - one backend's critique (Doubt and Polish)
//! - [`SynthesisRecord`] - consensus / divergence / verdict triple
//! - [`PolishReport`] - three analyses plus their synthesis
//! - [`ParseOutcome`] - how a parsed value was obtained

use crate::core::role::ModelRole;
use serde::{Deserialize, Serialize};

/// Critique returned by a single backend invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Label of the backend that produced the critique (e.g. "Claude")
    pub source_label: String,
    /// Role the backend was consulted in
    pub focus: ModelRole,
    /// Raw critique text
    pub analysis: String,
    /// Discrete suggestions. Not extracted from free text yet; always empty
    /// for results built by [`AnalysisResult::from_raw`].
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Wrap a raw backend response without further parsing.
    pub fn from_raw(
        source_label: impl Into<String>,
        focus: ModelRole,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            focus,
            analysis: analysis.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Result of reconciling the three Polish analyses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRecord {
    /// Points all three analyses agree on
    #[serde(default)]
    pub consensus: String,
    /// Where the analyses clash
    #[serde(default)]
    pub divergence: String,
    /// Single combined recommendation
    #[serde(default)]
    pub verdict: String,
}

impl SynthesisRecord {
    pub fn new(
        consensus: impl Into<String>,
        divergence: impl Into<String>,
        verdict: impl Into<String>,
    ) -> Self {
        Self {
            consensus: consensus.into(),
            divergence: divergence.into(),
            verdict: verdict.into(),
        }
    }

    /// Record holding only a verdict, used when the moderator ignored the
    /// requested JSON shape.
    pub fn verdict_only(verdict: impl Into<String>) -> Self {
        Self {
            verdict: verdict.into(),
            ..Default::default()
        }
    }
}

/// How a parser arrived at its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Decoded from a JSON object in the response
    Structured,
    /// The response was the "nothing to report" sentinel
    Sentinel,
    /// A fallback heuristic produced the value
    Degraded { reason: String },
}

impl ParseOutcome {
    pub fn degraded(reason: impl Into<String>) -> Self {
        ParseOutcome::Degraded {
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ParseOutcome::Degraded { .. })
    }
}

/// A parsed value together with the way it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub outcome: ParseOutcome,
}

impl<T> Parsed<T> {
    pub fn new(value: T, outcome: ParseOutcome) -> Self {
        Self { value, outcome }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Combined report of a Polish run.
///
/// Only ever built once all three analyses and the synthesis call have
/// resolved; there is no partially populated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishReport {
    pub style: AnalysisResult,
    pub coherence: AnalysisResult,
    pub structure: AnalysisResult,
    pub synthesis: SynthesisRecord,
    /// Whether the synthesis came from structured JSON or a fallback
    pub synthesis_outcome: ParseOutcome,
}

impl PolishReport {
    pub fn new(
        style: AnalysisResult,
        coherence: AnalysisResult,
        structure: AnalysisResult,
        synthesis: Parsed<SynthesisRecord>,
    ) -> Self {
        debug_assert_eq!(style.focus, ModelRole::Style);
        debug_assert_eq!(coherence.focus, ModelRole::Coherence);
        debug_assert_eq!(structure.focus, ModelRole::Structure);

        Self {
            style,
            coherence,
            structure,
            synthesis: synthesis.value,
            synthesis_outcome: synthesis.outcome,
        }
    }

    /// Analysis for the given role
    pub fn analysis(&self, role: ModelRole) -> &AnalysisResult {
        match role {
            ModelRole::Style => &self.style,
            ModelRole::Coherence => &self.coherence,
            ModelRole::Structure => &self.structure,
        }
    }

    /// All three analyses in presentation order (Style, Coherence, Structure)
    pub fn analyses(&self) -> impl Iterator<Item = &AnalysisResult> {
        ModelRole::ALL.into_iter().map(|role| self.analysis(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> PolishReport {
        PolishReport::new(
            AnalysisResult::from_raw("Claude", ModelRole::Style, "style notes"),
            AnalysisResult::from_raw("Gemini", ModelRole::Coherence, "coherence notes"),
            AnalysisResult::from_raw("GPT", ModelRole::Structure, "structure notes"),
            Parsed::new(SynthesisRecord::new("c", "d", "v"), ParseOutcome::Structured),
        )
    }

    #[test]
    fn test_from_raw_has_no_suggestions() {
        let result = AnalysisResult::from_raw("GPT", ModelRole::Structure, "text");
        assert!(result.suggestions.is_empty());
        assert_eq!(result.focus, ModelRole::Structure);
    }

    #[test]
    fn test_analyses_follow_role_order() {
        let report = report();
        let labels: Vec<_> = report.analyses().map(|a| a.source_label.as_str()).collect();
        assert_eq!(labels, vec!["Claude", "Gemini", "GPT"]);
    }

    #[test]
    fn test_analysis_lookup_by_role() {
        let report = report();
        assert_eq!(report.analysis(ModelRole::Coherence).analysis, "coherence notes");
    }

    #[test]
    fn test_verdict_only_leaves_other_fields_empty() {
        let record = SynthesisRecord::verdict_only("do this");
        assert_eq!(record.consensus, "");
        assert_eq!(record.divergence, "");
        assert_eq!(record.verdict, "do this");
    }

    #[test]
    fn test_parse_outcome_serialization() {
        let json = serde_json::to_string(&ParseOutcome::degraded("no JSON")).unwrap();
        assert_eq!(json, r#"{"kind":"degraded","reason":"no JSON"}"#);
        assert!(ParseOutcome::degraded("x").is_degraded());
        assert!(!ParseOutcome::Structured.is_degraded());
    }
}
