//! Scripted backends and progress recorders shared by use case tests.

use crate::ports::model_backend::{BackendError, ModelBackend};
use crate::ports::progress::CouncilProgress;
use async_trait::async_trait;
use council_domain::{ActivationMode, ModelRole};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Reply = Box<dyn Fn(&str, &str) -> Result<String, BackendError> + Send + Sync>;

/// Backend whose answer is computed from `(system, user)` after an optional delay.
pub(crate) struct MockBackend {
    label: &'static str,
    delay: Duration,
    reply: Reply,
    calls: Mutex<Vec<(String, String)>>,
    completions: Option<Arc<Mutex<Vec<&'static str>>>>,
}

impl MockBackend {
    pub(crate) fn new(
        label: &'static str,
        reply: impl Fn(&str, &str) -> Result<String, BackendError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            delay: Duration::ZERO,
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
            completions: None,
        }
    }

    /// Always answer with the same text
    pub(crate) fn replying(label: &'static str, text: &'static str) -> Self {
        Self::new(label, move |_, _| Ok(text.to_string()))
    }

    /// Always fail
    pub(crate) fn failing(label: &'static str) -> Self {
        Self::new(label, move |_, _| Err(BackendError::transport(label, "connection reset")))
    }

    pub(crate) fn with_delay(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    /// Append this backend's label to `log` whenever a call finishes
    pub(crate) fn recording_completions(mut self, log: Arc<Mutex<Vec<&'static str>>>) -> Self {
        self.completions = Some(log);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    fn label(&self) -> &str {
        self.label
    }

    async fn invoke(&self, system: &str, user: &str) -> Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(log) = &self.completions {
            log.lock().unwrap().push(self.label);
        }

        (self.reply)(system, user)
    }
}

/// Progress notifier that records every event as a string
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl CouncilProgress for RecordingProgress {
    fn on_call_start(&self, role: ModelRole, backend: &str) {
        self.push(format!("start:{}:{}", role, backend));
    }

    fn on_call_complete(&self, role: ModelRole, success: bool) {
        self.push(format!("complete:{}:{}", role, success));
    }

    fn on_mode_start(&self, mode: ActivationMode) {
        self.push(format!("mode_start:{}", mode));
    }

    fn on_mode_complete(&self, mode: ActivationMode, success: bool) {
        self.push(format!("mode_complete:{}:{}", mode, success));
    }

    fn on_synthesis_start(&self, backend: &str) {
        self.push(format!("synthesis_start:{}", backend));
    }

    fn on_synthesis_complete(&self, success: bool) {
        self.push(format!("synthesis_complete:{}", success));
    }
}
