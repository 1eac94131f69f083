//! Progress notification port
//!
//! Defines the interface for reporting progress while the council runs.

use council_domain::{ActivationMode, ModelRole};

/// Callback for progress updates during a council request
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain text, etc.)
pub trait CouncilProgress: Send + Sync {
    /// Called before a role's backend is invoked
    fn on_call_start(&self, role: ModelRole, backend: &str);

    /// Called when a role's backend call resolves
    fn on_call_complete(&self, role: ModelRole, success: bool);

    /// Called when a mode starts
    fn on_mode_start(&self, _mode: ActivationMode) {}

    /// Called when a mode finishes, successfully or not
    fn on_mode_complete(&self, _mode: ActivationMode, _success: bool) {}

    /// Called before the council lead is asked for a synthesis
    fn on_synthesis_start(&self, _backend: &str) {}

    /// Called when the synthesis call resolves
    fn on_synthesis_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CouncilProgress for NoProgress {
    fn on_call_start(&self, _role: ModelRole, _backend: &str) {}
    fn on_call_complete(&self, _role: ModelRole, _success: bool) {}
}
