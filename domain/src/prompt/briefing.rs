//! Per-request briefing header

use serde::{Deserialize, Serialize};

/// Narrative metadata supplied by the caller of a Polish request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefingFields {
    pub project_name: String,
    /// Label of the style the author is aiming for (not the full document)
    pub style_ref: String,
    pub chapter: String,
    pub scene: String,
    /// Emotional state of the narrator/protagonist in this scene
    pub emotional_state: String,
}

impl Default for BriefingFields {
    fn default() -> Self {
        Self {
            project_name: "Untitled Project".to_string(),
            style_ref: "Metamodernism".to_string(),
            chapter: "1".to_string(),
            scene: "1".to_string(),
            emotional_state: "Neutral".to_string(),
        }
    }
}

impl BriefingFields {
    /// Render the briefing header for these fields.
    pub fn briefing(&self) -> String {
        build_briefing(
            &self.project_name,
            &self.style_ref,
            &self.chapter,
            &self.scene,
            &self.emotional_state,
        )
    }
}

/// Build the briefing header prepended to every Polish user message.
///
/// Pure: identical inputs always give identical output.
pub fn build_briefing(
    project_name: &str,
    style_ref: &str,
    chapter: &str,
    scene: &str,
    emotional_state: &str,
) -> String {
    format!(
        r#"Project context: you are working on the literary project "{project_name}".
Reference style: {style_ref}.
Position in the plot: Chapter {chapter}, Scene {scene}.
Protagonist's emotional state: {emotional_state}.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_briefing_contains_all_fields() {
        let briefing = build_briefing("Salt", "Autofiction", "3", "2", "Anxious");
        assert!(briefing.contains("\"Salt\""));
        assert!(briefing.contains("Reference style: Autofiction."));
        assert!(briefing.contains("Chapter 3, Scene 2"));
        assert!(briefing.contains("Anxious"));
    }

    #[test]
    fn test_briefing_is_deterministic() {
        let fields = BriefingFields {
            project_name: "Salt".to_string(),
            emotional_state: "Reflective".to_string(),
            ..Default::default()
        };
        assert_eq!(fields.briefing(), fields.briefing());
        assert_eq!(
            build_briefing("a", "b", "c", "d", "e"),
            build_briefing("a", "b", "c", "d", "e")
        );
    }

    #[test]
    fn test_defaults() {
        let fields = BriefingFields::default();
        assert_eq!(fields.project_name, "Untitled Project");
        assert_eq!(fields.chapter, "1");
        assert_eq!(fields.emotional_state, "Neutral");
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let fields: BriefingFields = serde_json::from_str(r#"{"chapter": "7"}"#).unwrap();
        assert_eq!(fields.chapter, "7");
        assert_eq!(fields.scene, "1");
    }
}
