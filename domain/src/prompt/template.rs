//! Prompt templates for the council flow

use super::style_reference::StyleReference;
use crate::core::role::ModelRole;

const COHERENCE_SYSTEM: &str = r#"You are the Coherence Guardian. Your job is to fact-check the narrative universe.

Cross-check: compare the excerpt against the manuscript context and the character definitions.

ANALYSIS DIRECTIVES:
1. Inconsistencies: point out when a character acts against their core motivation, or when there are continuity errors (objects, dates, places).
2. Long-term memory: remind the author of forgotten elements that could be used here to create narrative rhymes (e.g. "You mentioned a broken watch in Chapter 1; would this be a good moment for it to return?").

Output: list only critical inconsistencies or suggestions for thematic connection."#;

const STRUCTURE_SYSTEM: &str = r#"You are the Structure Architect. Use deep reasoning to analyse the substructure of the scene.

ANALYSIS DIRECTIVES:
1. Causality: does action X lead logically to consequence Y? Is there a deus ex machina?
2. Subtext: what does the character really want in this scene, and how is it implied (or why is it too obvious)?
3. Narrative tension: does the scene move the story forward, or is it filler?

Process: think step by step about the narrative risks before giving your verdict.
Output: a brief structural diagnosis and one provocative question for the author to reflect on where the scene is heading."#;

const SYNTHESIS_SYSTEM: &str =
    "You are the Lead of the Editorial Council. Your job is to synthesize expert feedback.";

/// The council's prompt map.
///
/// Built once at startup from the loaded [`StyleReference`] and read-only
/// afterwards. Holds one system prompt per [`ModelRole`] and renders the user
/// messages for each activation mode.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    style_system: String,
}

impl PromptRegistry {
    pub fn new(style_reference: &StyleReference) -> Self {
        let style_system = format!(
            r#"You are the Style Consultant. Your job is to analyse the excerpt you are sent and assess the density of the prose.

STYLE REFERENCE (absolute authority):
{}

ANALYSIS DIRECTIVES:
1. Adjectives: identify lazy adjectives and suggest replacing them with concrete images or philosophical abstractions.
2. Syntax: check whether sentence rhythm reflects the character's state of mind. If the character is anxious, suggest shorter, paratactic sentences. If reflective, suggest elegant subordination.
3. Authorial voice: keep the tone of cerebral autofiction. Avoid any trace of commercial or melodramatic writing.

Output: give 3 rewrite suggestions, each focused on a different nuance (e.g. one more minimalist, another more lyrical)."#,
            style_reference.content()
        );

        Self { style_system }
    }

    /// System prompt bound to a role
    pub fn system_prompt(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Style => &self.style_system,
            ModelRole::Coherence => COHERENCE_SYSTEM,
            ModelRole::Structure => STRUCTURE_SYSTEM,
        }
    }

    /// System prompt for the council lead that synthesizes the three analyses
    pub fn synthesis_system(&self) -> &'static str {
        SYNTHESIS_SYSTEM
    }

    /// User message for Flow mode (sent to the Coherence role)
    pub fn flow_message(&self, current_text: &str, manuscript_context: &str) -> String {
        format!(
            r#"Manuscript context:
{manuscript_context}

---
Text being written right now:
{current_text}

---
Check ONLY factual inconsistencies (time, place, character details).
If there are no problems, reply only: "OK"
If there are, reply in JSON: {{"kind": "...", "severity": "low|medium|high", "message": "...", "suggestion": "..."}}"#
        )
    }

    /// User message for Doubt mode (sent to the Structure role)
    pub fn doubt_message(&self, question: &str, text_context: &str) -> String {
        format!(
            r#"Text context:
{text_context}

The writer's question:
{question}

Analyse using tree-of-thought reasoning."#
        )
    }

    /// User message for one role in Polish mode.
    ///
    /// Every role sees the briefing and the excerpt. Coherence additionally
    /// gets the manuscript context; Structure is asked to weigh what is left
    /// unsaid.
    pub fn polish_message(
        &self,
        role: ModelRole,
        briefing: &str,
        text: &str,
        manuscript_context: &str,
    ) -> String {
        match role {
            ModelRole::Style => format!("{briefing}\n\nEXCERPT FOR ANALYSIS:\n{text}"),
            ModelRole::Coherence => format!(
                "{briefing}\n\nGENERAL CONTEXT:\n{manuscript_context}\n\nEXCERPT FOR ANALYSIS:\n{text}"
            ),
            ModelRole::Structure => format!(
                "{briefing}\n\nEXCERPT FOR ANALYSIS:\n{text}\n\n(Consider what was implied but not said)"
            ),
        }
    }

    /// User message asking the council lead to reconcile the three analyses
    pub fn synthesis_message(&self, style: &str, coherence: &str, structure: &str) -> String {
        format!(
            r#"Below are the critiques of three experts on the same text.

[Expert 1 - Style]:
{style}

[Expert 2 - Coherence]:
{coherence}

[Expert 3 - Structure]:
{structure}

SYNTHESIS TASK:
1. Summarise the consensus: what do all three agree on?
2. Highlight the divergence: where do the opinions clash? (e.g. "Style loved the lyricism, but Structure thought it slows the pace.")
3. Verdict: present a combined final recommendation that follows everyone's suggestions in a balanced way.

Reply in JSON:
{{
    "consensus": "...",
    "divergence": "...",
    "verdict": "..."
}}"#
        )
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new(&StyleReference::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_prompt_embeds_reference() {
        let registry = PromptRegistry::new(&StyleReference::new("Write like Annie Ernaux."));
        assert!(registry.system_prompt(ModelRole::Style).contains("Write like Annie Ernaux."));
    }

    #[test]
    fn test_each_role_has_distinct_prompt() {
        let registry = PromptRegistry::default();
        let style = registry.system_prompt(ModelRole::Style);
        let coherence = registry.system_prompt(ModelRole::Coherence);
        let structure = registry.system_prompt(ModelRole::Structure);
        assert!(style.contains("Style Consultant"));
        assert!(coherence.contains("Coherence Guardian"));
        assert!(structure.contains("Structure Architect"));
    }

    #[test]
    fn test_flow_message_requests_ok_or_json() {
        let message = PromptRegistry::default().flow_message("She left at dawn.", "Chapter 1: night");
        assert!(message.contains("She left at dawn."));
        assert!(message.contains("Chapter 1: night"));
        assert!(message.contains("\"OK\""));
        assert!(message.contains(r#"{"kind": "...""#));
    }

    #[test]
    fn test_doubt_message_contains_question() {
        let message = PromptRegistry::default().doubt_message("Is the ending earned?", "draft");
        assert!(message.contains("Is the ending earned?"));
        assert!(message.contains("draft"));
    }

    #[test]
    fn test_polish_messages_are_role_specific() {
        let registry = PromptRegistry::default();
        let style = registry.polish_message(ModelRole::Style, "BRIEF", "TEXT", "MANUSCRIPT");
        let coherence =
            registry.polish_message(ModelRole::Coherence, "BRIEF", "TEXT", "MANUSCRIPT");
        let structure =
            registry.polish_message(ModelRole::Structure, "BRIEF", "TEXT", "MANUSCRIPT");

        for message in [&style, &coherence, &structure] {
            assert!(message.starts_with("BRIEF"));
            assert!(message.contains("TEXT"));
        }
        assert!(!style.contains("MANUSCRIPT"));
        assert!(coherence.contains("MANUSCRIPT"));
        assert!(!structure.contains("MANUSCRIPT"));
        assert!(structure.contains("implied but not said"));
    }

    #[test]
    fn test_synthesis_message_labels_each_role() {
        let message = PromptRegistry::default().synthesis_message("S", "C", "T");
        assert!(message.contains("[Expert 1 - Style]:\nS"));
        assert!(message.contains("[Expert 2 - Coherence]:\nC"));
        assert!(message.contains("[Expert 3 - Structure]:\nT"));
        assert!(message.contains("\"verdict\""));
    }
}
