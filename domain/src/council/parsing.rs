//! Tolerant parsing of free-form model responses.
//!
//! Models are asked for either a bare `OK` or a JSON object, but in practice
//! they wrap the JSON in markdown fences, add a preamble, or ignore the
//! format entirely. These functions are pure domain logic: no I/O, only text
//! inspection and `serde_json` decoding.

use super::entities::{ConsistencyAlert, Severity};
use super::value_objects::{ParseOutcome, Parsed, SynthesisRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Literal token the Coherence backend answers with when nothing is wrong.
pub const OK_SENTINEL: &str = "OK";

/// Character-count cutoffs used by the Flow fallback heuristics.
///
/// These are tuning constants, not semantic boundaries; both are exposed
/// through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseThresholds {
    /// A trimmed response shorter than this that contains [`OK_SENTINEL`]
    /// counts as "no alert".
    pub ok_sentinel_max_len: usize,
    /// An unparseable response longer than this becomes a low-severity alert;
    /// anything at or below it is ignored.
    pub alert_min_len: usize,
}

impl Default for ParseThresholds {
    fn default() -> Self {
        Self {
            ok_sentinel_max_len: 10,
            alert_min_len: 20,
        }
    }
}

/// Find the first balanced JSON object embedded in `text`.
///
/// A single pass records every balanced `{...}` span with a stack of open
/// brace offsets. Quotes only open a string literal inside a brace, so
/// apostrophes and quotes in the surrounding prose are ignored, and braces
/// inside string literals (including escaped quotes) do not count. Spans are
/// then tried in order of their opening brace; one that is not a valid JSON
/// object, such as `{sigh}` in dialogue, is skipped.
pub fn find_json_object(text: &str) -> Option<&str> {
    balanced_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .find(|candidate| serde_json::from_str::<Value>(candidate).is_ok_and(|v| v.is_object()))
}

/// Byte ranges of the balanced `{...}` spans in `text`, sorted by start.
fn balanced_spans(text: &str) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if !open.is_empty() => in_string = true,
            '{' => open.push(i),
            '}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}

/// Alert as models actually write it: only `message` is required, `type` is
/// accepted in place of `kind`.
#[derive(Debug, Deserialize)]
struct RawAlert {
    #[serde(default, alias = "type")]
    kind: Option<String>,
    #[serde(default)]
    severity: Option<String>,
    message: String,
    #[serde(default)]
    suggestion: Option<String>,
}

impl From<RawAlert> for ConsistencyAlert {
    fn from(raw: RawAlert) -> Self {
        ConsistencyAlert {
            kind: raw
                .kind
                .filter(|k| !k.trim().is_empty())
                .unwrap_or_else(|| ConsistencyAlert::DEFAULT_KIND.to_string()),
            severity: raw
                .severity
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            message: raw.message,
            suggestion: raw.suggestion.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Apply the OK-or-JSON policy to a Coherence response.
///
/// 1. Exactly `OK`, or a short response containing it → no alert.
/// 2. First embedded JSON object decoded as an alert; missing fields take
///    defaults (severity `low`, no suggestion). An object without a
///    non-blank `message` does not count as an alert.
/// 3. Otherwise, text longer than `alert_min_len` chars becomes a
///    low-severity `plot` alert carrying the text; shorter text is ignored.
///
/// # Examples
///
/// ```
/// use council_domain::council::parsing::{parse_flow_response, ParseThresholds};
///
/// let thresholds = ParseThresholds::default();
/// assert!(parse_flow_response("OK", &thresholds).value.is_none());
/// assert!(parse_flow_response("Hmmm.", &thresholds).value.is_none());
///
/// let alert = parse_flow_response(
///     r#"{"kind": "spatial", "severity": "medium", "message": "She was upstairs"}"#,
///     &thresholds,
/// )
/// .value
/// .unwrap();
/// assert_eq!(alert.kind, "spatial");
/// ```
pub fn parse_flow_response(
    response: &str,
    thresholds: &ParseThresholds,
) -> Parsed<Option<ConsistencyAlert>> {
    let content = response.trim();
    let length = content.chars().count();

    if content == OK_SENTINEL
        || (length < thresholds.ok_sentinel_max_len && content.contains(OK_SENTINEL))
    {
        return Parsed::new(None, ParseOutcome::Sentinel);
    }

    let reason = match find_json_object(content) {
        Some(json) => match serde_json::from_str::<RawAlert>(json) {
            Ok(raw) if !raw.message.trim().is_empty() => {
                return Parsed::new(Some(raw.into()), ParseOutcome::Structured);
            }
            Ok(_) => "alert JSON has a blank message".to_string(),
            Err(e) => format!("alert JSON did not decode: {}", e),
        },
        None => "no JSON object in response".to_string(),
    };

    if length > thresholds.alert_min_len {
        let alert = ConsistencyAlert::new(ConsistencyAlert::DEFAULT_KIND, Severity::Low, content);
        Parsed::new(Some(alert), ParseOutcome::degraded(reason))
    } else {
        Parsed::new(
            None,
            ParseOutcome::degraded(format!("{}; short response ignored", reason)),
        )
    }
}

/// Apply the structured-JSON-with-fallback policy to a synthesis response.
///
/// Decodes the first embedded JSON object into a [`SynthesisRecord`]; absent
/// fields become empty strings. Lists are joined one item per line. If no
/// object is found, the whole trimmed response becomes the verdict.
///
/// An object carrying none of `consensus`, `divergence` or `verdict` is
/// deliberately not decoded into an all-empty record: it is treated like
/// free text, so the raw response becomes the verdict and the outcome is
/// degraded. An empty verdict would otherwise hide whatever the moderator
/// actually said.
pub fn parse_synthesis_response(response: &str) -> Parsed<SynthesisRecord> {
    let content = response.trim();

    let decoded =
        find_json_object(content).map(|json| serde_json::from_str::<Map<String, Value>>(json));

    let reason = match decoded {
        Some(Ok(object)) => {
            let field = |name: &str| object.get(name).map(flatten_field);
            let (consensus, divergence, verdict) =
                (field("consensus"), field("divergence"), field("verdict"));

            if consensus.is_some() || divergence.is_some() || verdict.is_some() {
                let record = SynthesisRecord::new(
                    consensus.unwrap_or_default(),
                    divergence.unwrap_or_default(),
                    verdict.unwrap_or_default(),
                );
                return Parsed::new(record, ParseOutcome::Structured);
            }
            "JSON object has no consensus, divergence or verdict".to_string()
        }
        Some(Err(e)) => format!("synthesis JSON did not decode: {}", e),
        None => "no JSON object in response".to_string(),
    };

    Parsed::new(
        SynthesisRecord::verdict_only(content),
        ParseOutcome::degraded(reason),
    )
}

/// Render a JSON field value as plain text.
fn flatten_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_field)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(response: &str) -> Parsed<Option<ConsistencyAlert>> {
        parse_flow_response(response, &ParseThresholds::default())
    }

    // ==================== find_json_object Tests ====================

    #[test]
    fn test_find_plain_object() {
        assert_eq!(find_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_find_object_in_markdown_fence() {
        let text = "Here you go:\n```json\n{\"verdict\": \"cut it\"}\n```\n";
        assert_eq!(find_json_object(text), Some("{\"verdict\": \"cut it\"}"));
    }

    #[test]
    fn test_find_nested_object_returns_outer() {
        let text = r#"x {"a": {"b": 2}} y"#;
        assert_eq!(find_json_object(text), Some(r#"{"a": {"b": 2}}"#));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"message": "she wrote } and { on the wall", "kind": "plot"}"#;
        assert_eq!(find_json_object(text), Some(text));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"{"message": "he said \"wait}\" twice"}"#;
        assert_eq!(find_json_object(text), Some(text));
    }

    #[test]
    fn test_prose_braces_before_json_are_skipped() {
        let text = r#"The line "{sigh}" reads oddly. {"kind": "character"} and {trailing}"#;
        assert_eq!(find_json_object(text), Some(r#"{"kind": "character"}"#));
    }

    #[test]
    fn test_leftmost_rightmost_would_misparse() {
        let text = r#"{"kind": "plot"} then a stray } brace"#;
        assert_eq!(find_json_object(text), Some(r#"{"kind": "plot"}"#));
    }

    #[test]
    fn test_quote_in_prose_does_not_hide_object() {
        let text = r#"Elena's "doubt" {"kind": "character", "message": "m"}"#;
        assert_eq!(
            find_json_object(text),
            Some(r#"{"kind": "character", "message": "m"}"#)
        );
    }

    #[test]
    fn test_object_after_unclosed_braces() {
        let text = r#"{{ draft { notes {"message": "late"}"#;
        assert_eq!(find_json_object(text), Some(r#"{"message": "late"}"#));
    }

    #[test]
    fn test_brace_heavy_input_scans_in_linear_time() {
        use std::time::{Duration, Instant};

        let unclosed = format!("{}{}", "{".repeat(50_000), r#"{"message": "end"}"#);
        let nested = format!("{}{}", "{".repeat(50_000), "}".repeat(50_000));

        let started = Instant::now();
        assert_eq!(find_json_object(&unclosed), Some(r#"{"message": "end"}"#));
        assert_eq!(find_json_object(&nested), Some("{}"));
        assert!(flow(&unclosed).value.is_some());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_unbalanced_returns_none() {
        assert_eq!(find_json_object(r#"{"a": 1"#), None);
        assert_eq!(find_json_object("no braces at all"), None);
    }

    // ==================== parse_flow_response Tests ====================

    #[test]
    fn test_flow_exact_ok_is_no_alert() {
        let parsed = flow("OK");
        assert!(parsed.value.is_none());
        assert_eq!(parsed.outcome, ParseOutcome::Sentinel);
    }

    #[test]
    fn test_flow_short_text_containing_ok() {
        assert!(flow("  \"OK\".\n").value.is_none());
    }

    #[test]
    fn test_flow_full_json_alert() {
        let parsed =
            flow(r#"{"kind":"temporal","severity":"high","message":"m","suggestion":"s"}"#);
        assert_eq!(
            parsed.value,
            Some(ConsistencyAlert::new("temporal", Severity::High, "m").with_suggestion("s"))
        );
        assert_eq!(parsed.outcome, ParseOutcome::Structured);
    }

    #[test]
    fn test_flow_accepts_type_key() {
        let alert = flow(r#"{"type": "spatial", "severity": "medium", "message": "moved rooms"}"#)
            .value
            .unwrap();
        assert_eq!(alert.kind, "spatial");
        assert_eq!(alert.severity, Severity::Medium);
    }

    #[test]
    fn test_flow_missing_fields_use_defaults() {
        let alert = flow(r#"```json
{"kind": "character", "message": "Eyes were green in chapter 1"}
```"#)
        .value
        .unwrap();
        assert_eq!(alert.severity, Severity::Low);
        assert_eq!(alert.suggestion, None);
    }

    #[test]
    fn test_flow_unknown_severity_falls_back_to_low() {
        let alert = flow(r#"{"kind": "plot", "severity": "critical", "message": "x"}"#)
            .value
            .unwrap();
        assert_eq!(alert.severity, Severity::Low);
    }

    #[test]
    fn test_flow_short_unparseable_is_no_alert() {
        let parsed = flow("Hmmm.");
        assert!(parsed.value.is_none());
        assert!(parsed.outcome.is_degraded());
    }

    #[test]
    fn test_flow_long_free_text_becomes_plot_alert() {
        let text = "The narrator says it is winter, yet the garden is in full bloom. ".repeat(4);
        let text = &text[..200];
        assert_eq!(text.chars().count(), 200);

        let parsed = flow(text);
        let alert = parsed.value.unwrap();
        assert_eq!(alert.kind, "plot");
        assert_eq!(alert.severity, Severity::Low);
        assert_eq!(alert.message, text.trim());
        assert!(parsed.outcome.is_degraded());
    }

    #[test]
    fn test_flow_undecodable_json_with_long_text_alerts() {
        let text = r#"There is a problem here: {"severity": ["high"]} see the chapter one draft"#;
        let parsed = flow(text);
        assert_eq!(parsed.value.unwrap().message, text);
    }

    #[test]
    fn test_flow_object_without_message_is_not_an_alert() {
        let parsed = flow("{}");
        assert!(parsed.value.is_none());
        assert!(parsed.outcome.is_degraded());

        assert!(flow(r#"{"kind": "plot", "message": "  "}"#).value.is_none());
    }

    #[test]
    fn test_flow_long_text_with_messageless_json_alerts_on_raw_text() {
        let text = r#"The timeline slips here: {"kind": "temporal", "severity": "high"} check chapter two"#;
        let parsed = flow(text);
        let alert = parsed.value.unwrap();
        assert_eq!(alert.kind, "plot");
        assert_eq!(alert.severity, Severity::Low);
        assert_eq!(alert.message, text);
        assert!(parsed.outcome.is_degraded());
    }

    #[test]
    fn test_flow_thresholds_are_configurable() {
        let strict = ParseThresholds {
            ok_sentinel_max_len: 10,
            alert_min_len: 3,
        };
        let alert = parse_flow_response("Hmmm.", &strict).value.unwrap();
        assert_eq!(alert.message, "Hmmm.");
    }

    // ==================== parse_synthesis_response Tests ====================

    #[test]
    fn test_synthesis_structured() {
        let parsed = parse_synthesis_response(
            r#"{"consensus": "all agree", "divergence": "pace", "verdict": "tighten"}"#,
        );
        assert_eq!(parsed.value, SynthesisRecord::new("all agree", "pace", "tighten"));
        assert_eq!(parsed.outcome, ParseOutcome::Structured);
    }

    #[test]
    fn test_synthesis_missing_fields_are_empty() {
        let parsed = parse_synthesis_response("```json\n{\"verdict\": \"keep it\"}\n```");
        assert_eq!(parsed.value, SynthesisRecord::verdict_only("keep it"));
        assert_eq!(parsed.outcome, ParseOutcome::Structured);
    }

    #[test]
    fn test_synthesis_lists_are_joined() {
        let parsed =
            parse_synthesis_response(r#"{"consensus": ["tone", "pacing"], "verdict": "ok"}"#);
        assert_eq!(parsed.value.consensus, "tone\npacing");
    }

    #[test]
    fn test_synthesis_free_text_becomes_verdict() {
        let text = "All three experts liked the opening; rewrite the ending.";
        let parsed = parse_synthesis_response(text);
        assert_eq!(parsed.value.verdict, text);
        assert_eq!(parsed.value.consensus, "");
        assert_eq!(parsed.value.divergence, "");
        assert!(parsed.outcome.is_degraded());
    }

    #[test]
    fn test_synthesis_unrelated_object_is_degraded() {
        let text = r#"{"score": 7}"#;
        let parsed = parse_synthesis_response(text);
        assert_eq!(parsed.value.verdict, text);
        assert!(parsed.outcome.is_degraded());
    }
}
