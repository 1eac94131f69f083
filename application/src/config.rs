//! Application-level configuration.
//!
//! Controls choices that are fixed for the lifetime of a council instance,
//! such as which backend leads the synthesis.

use council_domain::{ModelRole, ParseThresholds};

/// Council behavior configuration.
///
/// Retries and timeouts are not handled here: the controller performs no
/// retries, and each backend adapter enforces its own request timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouncilBehavior {
    /// Role whose backend also serves as council lead for synthesis
    pub synthesis_role: ModelRole,
    /// Cutoffs for the Flow response fallbacks
    pub parse_thresholds: ParseThresholds,
}

impl Default for CouncilBehavior {
    fn default() -> Self {
        Self {
            synthesis_role: ModelRole::Structure,
            parse_thresholds: ParseThresholds::default(),
        }
    }
}

impl CouncilBehavior {
    pub fn with_synthesis_role(mut self, role: ModelRole) -> Self {
        self.synthesis_role = role;
        self
    }

    pub fn with_parse_thresholds(mut self, thresholds: ParseThresholds) -> Self {
        self.parse_thresholds = thresholds;
        self
    }
}
