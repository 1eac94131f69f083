//! Style reference value object

use serde::{Deserialize, Serialize};

/// Substituted when no style-reference document can be loaded.
pub const DEFAULT_STYLE_REFERENCE: &str =
    "Style: Metamodernism. References: Ben Lerner, Rachel Cusk. Avoid melodrama.";

/// The author's desired literary voice.
///
/// Loaded once at startup and immutable afterwards. The Style role's system
/// prompt embeds it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleReference {
    content: String,
}

impl StyleReference {
    /// Create a style reference, substituting the default for blank content.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        if content.trim().is_empty() {
            Self::default()
        } else {
            Self { content }
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this is the built-in fallback text
    pub fn is_default(&self) -> bool {
        self.content == DEFAULT_STYLE_REFERENCE
    }
}

impl Default for StyleReference {
    fn default() -> Self {
        Self {
            content: DEFAULT_STYLE_REFERENCE.to_string(),
        }
    }
}

impl std::fmt::Display for StyleReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
