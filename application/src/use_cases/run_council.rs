//! Run Council use case
//!
//! The mode controller: turns one activation mode plus its payload into
//! backend calls, parses the responses, and returns a structured result.
//!
//! Each request is a one-shot transition from idle to done or failed. No
//! state survives between requests except the immutable prompt registry and
//! the three backend handles.

use crate::config::CouncilBehavior;
use crate::ports::model_backend::{BackendError, CouncilBackends};
use crate::ports::progress::{CouncilProgress, NoProgress};
use crate::use_cases::synthesize::SynthesisEngine;
use council_domain::{
    ActivationMode, AnalysisResult, BriefingFields, ConsistencyAlert, ModelRole, ParseOutcome,
    PolishReport, PromptRegistry, parse_flow_response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running the council
#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("{role} backend failed: {source}")]
    Backend {
        role: ModelRole,
        #[source]
        source: BackendError,
    },

    #[error("Synthesis failed: {0}")]
    Synthesis(#[source] BackendError),
}

impl CouncilError {
    /// The underlying backend failure
    pub fn backend_error(&self) -> &BackendError {
        match self {
            CouncilError::Backend { source, .. } => source,
            CouncilError::Synthesis(source) => source,
        }
    }

    /// Role whose analysis call failed, if the failure was not the synthesis
    pub fn role(&self) -> Option<ModelRole> {
        match self {
            CouncilError::Backend { role, .. } => Some(*role),
            CouncilError::Synthesis(_) => None,
        }
    }
}

/// Input for Flow mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRequest {
    pub current_text: String,
    pub manuscript_context: String,
}

impl FlowRequest {
    pub fn new(current_text: impl Into<String>, manuscript_context: impl Into<String>) -> Self {
        Self {
            current_text: current_text.into(),
            manuscript_context: manuscript_context.into(),
        }
    }
}

/// Input for Doubt mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubtRequest {
    pub question: String,
    pub text_context: String,
}

impl DoubtRequest {
    pub fn new(question: impl Into<String>, text_context: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            text_context: text_context.into(),
        }
    }
}

/// Input for Polish mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishRequest {
    pub text: String,
    pub manuscript_context: String,
    #[serde(flatten)]
    pub briefing: BriefingFields,
}

impl PolishRequest {
    pub fn new(text: impl Into<String>, manuscript_context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            manuscript_context: manuscript_context.into(),
            briefing: BriefingFields::default(),
        }
    }

    pub fn with_briefing(mut self, briefing: BriefingFields) -> Self {
        self.briefing = briefing;
        self
    }
}

/// A council request, one variant per activation mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CouncilRequest {
    Flow(FlowRequest),
    Doubt(DoubtRequest),
    Polish(PolishRequest),
}

impl CouncilRequest {
    pub fn mode(&self) -> ActivationMode {
        match self {
            CouncilRequest::Flow(_) => ActivationMode::Flow,
            CouncilRequest::Doubt(_) => ActivationMode::Doubt,
            CouncilRequest::Polish(_) => ActivationMode::Polish,
        }
    }
}

/// Result of a council request, matching the request's mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "result", rename_all = "lowercase")]
pub enum CouncilOutcome {
    Flow(Option<ConsistencyAlert>),
    Doubt(AnalysisResult),
    Polish(PolishReport),
}

impl CouncilOutcome {
    pub fn mode(&self) -> ActivationMode {
        match self {
            CouncilOutcome::Flow(_) => ActivationMode::Flow,
            CouncilOutcome::Doubt(_) => ActivationMode::Doubt,
            CouncilOutcome::Polish(_) => ActivationMode::Polish,
        }
    }
}

/// The editorial council.
///
/// Holds the three role-bound backends, the prompt registry and the
/// synthesis engine. Construct once and share by reference; concurrent
/// requests do not interact.
pub struct EditorialCouncil {
    backends: CouncilBackends,
    prompts: Arc<PromptRegistry>,
    synthesis: SynthesisEngine,
    behavior: CouncilBehavior,
}

impl EditorialCouncil {
    pub fn new(
        backends: CouncilBackends,
        prompts: Arc<PromptRegistry>,
        behavior: CouncilBehavior,
    ) -> Self {
        let lead = Arc::clone(backends.get(behavior.synthesis_role));
        let synthesis = SynthesisEngine::new(lead, Arc::clone(&prompts));

        Self {
            backends,
            prompts,
            synthesis,
            behavior,
        }
    }

    pub fn behavior(&self) -> &CouncilBehavior {
        &self.behavior
    }

    /// Flow mode: ask Coherence whether the current text contradicts the
    /// manuscript. `None` means nothing was flagged; a backend failure is an
    /// error, never `None`.
    pub async fn run_flow(
        &self,
        request: &FlowRequest,
    ) -> Result<Option<ConsistencyAlert>, CouncilError> {
        self.flow(request, &NoProgress).await
    }

    /// Doubt mode: put the author's question to Structure.
    pub async fn run_doubt(&self, request: &DoubtRequest) -> Result<AnalysisResult, CouncilError> {
        self.doubt(request, &NoProgress).await
    }

    /// Polish mode: three concurrent critiques, then a synthesis.
    pub async fn run_polish(&self, request: &PolishRequest) -> Result<PolishReport, CouncilError> {
        self.polish(request, &NoProgress).await
    }

    /// Dispatch a request by mode with default (no-op) progress
    pub async fn run(&self, request: &CouncilRequest) -> Result<CouncilOutcome, CouncilError> {
        self.run_with_progress(request, &NoProgress).await
    }

    /// Dispatch a request by mode with progress callbacks
    pub async fn run_with_progress(
        &self,
        request: &CouncilRequest,
        progress: &dyn CouncilProgress,
    ) -> Result<CouncilOutcome, CouncilError> {
        let mode = request.mode();
        info!(
            %mode,
            roles = ?mode.roles(),
            synthesis = mode.synthesizes(),
            "Council request started"
        );
        progress.on_mode_start(mode);

        let outcome = match request {
            CouncilRequest::Flow(req) => self.flow(req, progress).await.map(CouncilOutcome::Flow),
            CouncilRequest::Doubt(req) => {
                self.doubt(req, progress).await.map(CouncilOutcome::Doubt)
            }
            CouncilRequest::Polish(req) => {
                self.polish(req, progress).await.map(CouncilOutcome::Polish)
            }
        };

        progress.on_mode_complete(mode, outcome.is_ok());
        match &outcome {
            Ok(_) => info!(%mode, "Council request finished"),
            Err(e) => warn!(%mode, error = %e, "Council request failed"),
        }
        outcome
    }

    async fn flow(
        &self,
        request: &FlowRequest,
        progress: &dyn CouncilProgress,
    ) -> Result<Option<ConsistencyAlert>, CouncilError> {
        let message = self
            .prompts
            .flow_message(&request.current_text, &request.manuscript_context);
        let response = self
            .consult(ModelRole::Coherence, &message, progress)
            .await?;

        let parsed = parse_flow_response(&response, &self.behavior.parse_thresholds);
        match &parsed.outcome {
            ParseOutcome::Degraded { reason } => {
                warn!(%reason, alert = parsed.value.is_some(), "Flow response was not structured")
            }
            outcome => debug!(?outcome, alert = parsed.value.is_some(), "Flow response parsed"),
        }

        Ok(parsed.into_value())
    }

    async fn doubt(
        &self,
        request: &DoubtRequest,
        progress: &dyn CouncilProgress,
    ) -> Result<AnalysisResult, CouncilError> {
        let message = self
            .prompts
            .doubt_message(&request.question, &request.text_context);
        let response = self
            .consult(ModelRole::Structure, &message, progress)
            .await?;

        Ok(self.analysis(ModelRole::Structure, response))
    }

    async fn polish(
        &self,
        request: &PolishRequest,
        progress: &dyn CouncilProgress,
    ) -> Result<PolishReport, CouncilError> {
        let briefing = request.briefing.briefing();
        let message = |role: ModelRole| {
            self.prompts
                .polish_message(role, &briefing, &request.text, &request.manuscript_context)
        };
        let (style_msg, coherence_msg, structure_msg) = (
            message(ModelRole::Style),
            message(ModelRole::Coherence),
            message(ModelRole::Structure),
        );

        // Barrier: all three must succeed. The first failure returns
        // immediately and the remaining calls are dropped without notifying
        // the providers.
        let (style, coherence, structure) = tokio::try_join!(
            self.consult(ModelRole::Style, &style_msg, progress),
            self.consult(ModelRole::Coherence, &coherence_msg, progress),
            self.consult(ModelRole::Structure, &structure_msg, progress),
        )?;

        progress.on_synthesis_start(self.synthesis.lead_label());
        let synthesis = self
            .synthesis
            .synthesize(&style, &coherence, &structure)
            .await;
        progress.on_synthesis_complete(synthesis.is_ok());
        let synthesis = synthesis.map_err(CouncilError::Synthesis)?;

        Ok(PolishReport::new(
            self.analysis(ModelRole::Style, style),
            self.analysis(ModelRole::Coherence, coherence),
            self.analysis(ModelRole::Structure, structure),
            synthesis,
        ))
    }

    /// Invoke the backend bound to `role` with that role's system prompt
    async fn consult(
        &self,
        role: ModelRole,
        message: &str,
        progress: &dyn CouncilProgress,
    ) -> Result<String, CouncilError> {
        let backend = self.backends.get(role);
        debug!(%role, backend = backend.label(), chars = message.len(), "Invoking backend");
        progress.on_call_start(role, backend.label());

        let result = backend
            .invoke(self.prompts.system_prompt(role), message)
            .await;
        progress.on_call_complete(role, result.is_ok());

        match result {
            Ok(response) => {
                debug!(%role, chars = response.len(), "Backend responded");
                Ok(response)
            }
            Err(source) => {
                warn!(%role, error = %source, "Backend call failed");
                Err(CouncilError::Backend { role, source })
            }
        }
    }

    fn analysis(&self, role: ModelRole, response: String) -> AnalysisResult {
        AnalysisResult::from_raw(self.backends.get(role).label(), role, response)
    }
}
