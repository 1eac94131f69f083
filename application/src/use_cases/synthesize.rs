//! Synthesis engine
//!
//! Second-stage call that reconciles the three Polish analyses into a
//! consensus / divergence / verdict record.

use crate::ports::model_backend::{BackendError, ModelBackend};
use council_domain::{
    ParseOutcome, Parsed, PromptRegistry, SynthesisRecord, parse_synthesis_response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Asks the council lead to reconcile three analyses.
///
/// The lead backend is a fixed configuration choice, not a per-request one.
pub struct SynthesisEngine {
    backend: Arc<dyn ModelBackend>,
    prompts: Arc<PromptRegistry>,
}

impl SynthesisEngine {
    pub fn new(backend: Arc<dyn ModelBackend>, prompts: Arc<PromptRegistry>) -> Self {
        Self { backend, prompts }
    }

    /// Label of the lead backend
    pub fn lead_label(&self) -> &str {
        self.backend.label()
    }

    /// Reconcile the three raw analyses.
    ///
    /// Fails only when the backend call fails. A response that is not
    /// well-formed JSON still yields a record, with the raw text as verdict
    /// and a degraded [`ParseOutcome`].
    pub async fn synthesize(
        &self,
        style: &str,
        coherence: &str,
        structure: &str,
    ) -> Result<Parsed<SynthesisRecord>, BackendError> {
        let message = self.prompts.synthesis_message(style, coherence, structure);
        debug!(
            lead = self.backend.label(),
            chars = message.len(),
            "Requesting synthesis"
        );

        let response = self
            .backend
            .invoke(self.prompts.synthesis_system(), &message)
            .await?;

        let parsed = parse_synthesis_response(&response);
        if let ParseOutcome::Degraded { reason } = &parsed.outcome {
            warn!(
                lead = self.backend.label(),
                %reason,
                "Synthesis response was not structured; using raw text as verdict"
            );
        }

        Ok(parsed)
    }
}
