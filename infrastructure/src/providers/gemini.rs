//! Google Gemini generateContent adapter

use super::http::{build_client, send_json};
use super::HttpBackendSettings;
use async_trait::async_trait;
use council_application::{BackendError, ModelBackend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini via `POST {base_url}/v1beta/models/{model}:generateContent`
pub struct GeminiBackend {
    client: reqwest::Client,
    settings: HttpBackendSettings,
}

impl GeminiBackend {
    pub fn new(settings: HttpBackendSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(settings.timeout)?,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

fn request_body<'a>(max_tokens: u32, system: &'a str, user: &'a str) -> GenerateRequest<'a> {
    GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: [Part { text: system }],
        },
        contents: [Content {
            role: Some("user"),
            parts: [Part { text: user }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: max_tokens,
        },
    }
}

/// Text parts of the first candidate, joined
fn response_text(response: GenerateResponse) -> Option<String> {
    let parts = response.candidates.into_iter().next()?.content?.parts;
    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.is_empty() { None } else { Some(text) }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    fn label(&self) -> &str {
        &self.settings.label
    }

    async fn invoke(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, BackendError> {
        let body = request_body(self.settings.max_tokens, system_instruction, user_message);
        let request = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body);

        let response: GenerateResponse = send_json(self.label(), request).await?;
        response_text(response)
            .ok_or_else(|| BackendError::malformed(self.label(), "no candidate text in response"))
    }
}
