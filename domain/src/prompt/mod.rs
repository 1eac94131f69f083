//! Prompt domain
//!
//! The prompt registry (one system prompt per role plus the synthesis lead),
//! the per-request briefing, and the style-reference document.

mod briefing;
mod style_reference;
mod template;

pub use briefing::{BriefingFields, build_briefing};
pub use style_reference::{DEFAULT_STYLE_REFERENCE, StyleReference};
pub use template::PromptRegistry;
