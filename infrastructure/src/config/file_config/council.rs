//! Council behavior configuration from TOML (`[council]` section)
//!
//! ```toml
//! [council]
//! synthesis_role = "structure"
//! style_reference = ["style_dna.md"]
//!
//! [council.parsing]
//! ok_sentinel_max_len = 10
//! alert_min_len = 20
//! ```

use council_application::CouncilBehavior;
use council_domain::{ModelRole, ParseThresholds};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STYLE_REFERENCE_FILE: &str = "style_dna.md";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Role whose backend also serves as council lead
    pub synthesis_role: ModelRole,
    /// Candidate style reference files, first readable one wins
    pub style_reference: Vec<PathBuf>,
    /// Tolerant parser thresholds
    pub parsing: ParseThresholds,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            synthesis_role: ModelRole::Structure,
            style_reference: vec![PathBuf::from(DEFAULT_STYLE_REFERENCE_FILE)],
            parsing: ParseThresholds::default(),
        }
    }
}

impl FileCouncilConfig {
    pub fn to_behavior(&self) -> CouncilBehavior {
        CouncilBehavior::default()
            .with_synthesis_role(self.synthesis_role)
            .with_parse_thresholds(self.parsing)
    }
}
